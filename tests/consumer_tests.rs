//! Consumer Tests
//!
//! Fetch exchanges over in-memory and loopback TCP transports.

use std::io::{self, Cursor, Read, Write};
use std::net::TcpListener;
use std::thread;

use kafka_fetch::network::{fetch_with, StreamTransport, Transport};
use kafka_fetch::protocol::{encode_request, FetchRequest};
use kafka_fetch::{Config, Consumer, FetchError};

/// In-memory duplex stream: reads from a canned response, records writes
struct Duplex {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl Duplex {
    fn new(response: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(response),
            output: Vec::new(),
        }
    }
}

impl Read for Duplex {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for Duplex {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Transport whose peer has gone away
struct Broken;

impl Transport for Broken {
    fn send(&mut self, _bytes: &[u8]) -> kafka_fetch::Result<()> {
        Err(FetchError::Connection("broken pipe".to_string()))
    }

    fn receive(&mut self, _len: usize) -> kafka_fetch::Result<Vec<u8>> {
        Err(FetchError::Connection("broken pipe".to_string()))
    }
}

fn response_frame(bodies: &[&[u8]]) -> Vec<u8> {
    let mut payload = vec![0x00, 0x00];
    for body in bodies {
        payload.extend_from_slice(&(body.len() as i32).to_be_bytes());
        payload.extend_from_slice(body);
    }
    let mut frame = (payload.len() as i32).to_be_bytes().to_vec();
    frame.extend_from_slice(&payload);
    frame
}

/// Read one fetch request off a socket, returning its raw bytes
fn read_request<R: Read>(reader: &mut R) -> Vec<u8> {
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix).unwrap();
    let mut body = vec![0u8; i32::from_be_bytes(prefix) as usize];
    reader.read_exact(&mut body).unwrap();

    let mut request = prefix.to_vec();
    request.extend_from_slice(&body);
    request
}

// =============================================================================
// In-Memory Transport Tests
// =============================================================================

#[test]
fn test_fetch_sends_encoded_request() {
    let request = FetchRequest::new("events", 3, 512).with_max_size(2048);
    let mut transport = StreamTransport::new(Duplex::new(response_frame(&[b"hello"])));

    let response = fetch_with(&mut transport, &request).unwrap();

    assert_eq!(response.len(), 1);
    assert_eq!(&response.messages[0].body[..], b"hello");
    assert_eq!(
        transport.into_inner().output,
        encode_request(&request).unwrap().to_vec()
    );
}

#[test]
fn test_fetch_empty_response() {
    let request = FetchRequest::new("events", 0, 4096);
    let mut transport = StreamTransport::new(Duplex::new(vec![0, 0, 0, 0]));

    let response = fetch_with(&mut transport, &request).unwrap();
    assert!(response.is_empty());
    assert_eq!(response.next_offset(4096), 4096);
}

#[test]
fn test_fetch_drops_truncated_tail() {
    let mut frame = response_frame(&[b"complete"]);
    // Dangling record claiming more than the frame carries
    frame.extend_from_slice(&100i32.to_be_bytes());
    frame.extend_from_slice(&[0u8; 10]);
    let declared = (frame.len() - 4) as i32;
    frame[0..4].copy_from_slice(&declared.to_be_bytes());

    let mut transport = StreamTransport::new(Duplex::new(frame));
    let response = fetch_with(&mut transport, &FetchRequest::new("t", 0, 0)).unwrap();

    assert_eq!(response.len(), 1);
    assert_eq!(&response.messages[0].body[..], b"complete");
}

#[test]
fn test_peer_closed_before_prefix() {
    let mut transport = StreamTransport::new(Duplex::new(vec![0x00, 0x00]));
    let result = fetch_with(&mut transport, &FetchRequest::new("t", 0, 0));
    assert!(matches!(result, Err(FetchError::Connection(_))));
}

#[test]
fn test_peer_closed_mid_payload() {
    let mut frame = response_frame(&[b"hello"]);
    frame.truncate(frame.len() - 3);

    let mut transport = StreamTransport::new(Duplex::new(frame));
    let result = fetch_with(&mut transport, &FetchRequest::new("t", 0, 0));
    assert!(matches!(result, Err(FetchError::Connection(_))));
}

#[test]
fn test_negative_length_prefix() {
    let mut transport = StreamTransport::new(Duplex::new((-8i32).to_be_bytes().to_vec()));
    let result = fetch_with(&mut transport, &FetchRequest::new("t", 0, 0));
    assert!(matches!(result, Err(FetchError::Framing(_))));
}

#[test]
fn test_oversized_length_prefix_rejected() {
    let request = FetchRequest::new("t", 0, 0).with_max_size(100);
    let mut response = i32::MAX.to_be_bytes().to_vec();
    response.extend_from_slice(&[0x00, 0x00]);

    let mut transport = StreamTransport::new(Duplex::new(response));
    let result = fetch_with(&mut transport, &request);

    assert!(matches!(result, Err(FetchError::Framing(_))));
    assert!(result.unwrap_err().to_string().contains("Response too large"));
    // Payload was never read
    assert_eq!(transport.into_inner().input.position(), 4);
}

#[test]
fn test_length_prefix_at_limit_accepted() {
    let frame = response_frame(&[b"0123456789"]);
    let max_size = (frame.len() - 4 - 2) as i32;
    let request = FetchRequest::new("t", 0, 0).with_max_size(max_size);

    let mut transport = StreamTransport::new(Duplex::new(frame.clone()));
    let response = fetch_with(&mut transport, &request).unwrap();
    assert_eq!(response.len(), 1);

    let request = request.with_max_size(max_size - 1);
    let mut transport = StreamTransport::new(Duplex::new(frame));
    let result = fetch_with(&mut transport, &request);
    assert!(matches!(result, Err(FetchError::Framing(_))));
}

#[test]
fn test_encoding_error_sends_nothing() {
    let request = FetchRequest::new("x".repeat(40_000), 0, 0);
    let mut transport = StreamTransport::new(Duplex::new(response_frame(&[])));

    let result = fetch_with(&mut transport, &request);

    assert!(matches!(result, Err(FetchError::Encoding(_))));
    assert!(transport.into_inner().output.is_empty());
}

#[test]
fn test_transport_errors_propagate() {
    let result = fetch_with(&mut Broken, &FetchRequest::new("t", 0, 0));
    assert!(matches!(result, Err(FetchError::Connection(_))));
}

// =============================================================================
// TCP Consumer Tests
// =============================================================================

#[test]
fn test_consume_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let broker = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        stream
            .write_all(&response_frame(&[b"first", b"second"]))
            .unwrap();
        request
    });

    let consumer = Consumer::new(Config::builder().server_addr(addr.to_string()).build());
    let response = consumer.consume("events", 1, 64).unwrap();

    assert_eq!(response.len(), 2);
    assert_eq!(&response.messages[0].body[..], b"first");
    assert_eq!(&response.messages[1].body[..], b"second");
    assert_eq!(response.next_offset(64), 64 + 9 + 10);

    let sent = broker.join().unwrap();
    let expected = encode_request(&FetchRequest::new("events", 1, 64)).unwrap();
    assert_eq!(sent, expected.to_vec());
}

#[test]
fn test_consume_uses_configured_max_size() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let broker = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        stream.write_all(&[0, 0, 0, 0]).unwrap();
        request
    });

    let config = Config::builder()
        .server_addr(addr.to_string())
        .max_size(300)
        .build();
    let response = Consumer::new(config).consume("t", 0, 0).unwrap();
    assert!(response.is_empty());

    let sent = broker.join().unwrap();
    let max_size = i32::from_be_bytes(sent[sent.len() - 4..].try_into().unwrap());
    assert_eq!(max_size, 300);
}

#[test]
fn test_consume_connection_refused() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let consumer = Consumer::new(Config::builder().server_addr(addr.to_string()).build());
    let result = consumer.consume("t", 0, 0);
    assert!(matches!(result, Err(FetchError::Connection(_))));
}

#[test]
fn test_consume_invalid_address() {
    let consumer = Consumer::new(Config::builder().server_addr("no-port-here").build());
    let result = consumer.consume("t", 0, 0);
    assert!(matches!(result, Err(FetchError::Config(_))));
}

#[test]
fn test_consume_rejects_bad_input_without_connecting() {
    // Nothing listens here; an encoding error must surface before connecting
    let consumer = Consumer::new(Config::builder().server_addr("no-port-here").build());
    let result = consumer.consume_with_max_size("t", 0, 0, 0);
    assert!(matches!(result, Err(FetchError::Encoding(_))));
}

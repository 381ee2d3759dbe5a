use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use charge_protocol::{MethodCall, MethodResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Connection failed: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

pub struct ChannelClient {
    writer: UnixStream,
    reader: BufReader<UnixStream>,
}

impl ChannelClient {
    pub fn connect(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path)?;
        stream.set_read_timeout(Some(Duration::from_secs(5)))?;
        stream.set_write_timeout(Some(Duration::from_secs(5)))?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            writer: stream,
            reader,
        })
    }

    pub fn call(&mut self, call: &MethodCall) -> Result<MethodResponse> {
        let json = call
            .to_json()
            .map_err(|e| ClientError::Protocol(e.to_string()))?;

        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ClientError::Protocol("Connection closed".into()));
        }
        tracing::debug!(line_len = line.len(), "Read response");

        MethodResponse::from_json(line.trim()).map_err(|e| ClientError::Protocol(e.to_string()))
    }
}

pub fn is_server_running(path: &Path) -> bool {
    UnixStream::connect(path).is_ok()
}

#[cfg(test)]
mod tests {
    use std::os::unix::net::UnixListener;
    use std::thread;

    use charge_protocol::GET_BATTERY_INFO;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_call_reads_one_response_line() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("client.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let call = MethodCall::from_json(line.trim()).unwrap();
            let mut stream = stream;
            writeln!(stream, "\"NotImplemented\"").unwrap();
            call
        });

        let mut client = ChannelClient::connect(&path).unwrap();
        let response = client.call(&MethodCall::new("foo")).unwrap();
        assert!(response.is_not_implemented());

        let seen = server.join().unwrap();
        assert_eq!(seen.method, "foo");
        assert_ne!(seen.method, GET_BATTERY_INFO);
    }

    #[test]
    fn test_closed_connection_is_protocol_error() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("closed.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
        });

        let mut client = ChannelClient::connect(&path).unwrap();
        let result = client.call(&MethodCall::get_battery_info());
        server.join().unwrap();
        assert!(matches!(result, Err(ClientError::Protocol(_))));
    }

    #[test]
    fn test_no_server() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("nobody.sock");
        assert!(!is_server_running(&path));
        assert!(matches!(
            ChannelClient::connect(&path),
            Err(ClientError::Connection(_))
        ));
    }
}

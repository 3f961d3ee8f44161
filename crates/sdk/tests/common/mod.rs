//! Single-shot HTTP/1.1 server used to capture what the client puts on the wire

#![allow(dead_code)]

use tokio::{
	io::{AsyncReadExt, AsyncWriteExt},
	net::{TcpListener, TcpStream},
	task::JoinHandle,
};

/// Request as received by the stub server
#[derive(Debug)]
pub struct CapturedRequest {
	pub head: String,
	pub body: Vec<u8>,
}

impl CapturedRequest {
	/// First line, e.g. `GET /document/5 HTTP/1.1`
	pub fn request_line(&self) -> &str {
		self.head.lines().next().unwrap_or_default()
	}

	/// Header value by case-insensitive name
	pub fn header(&self, name: &str) -> Option<&str> {
		self.head.lines().skip(1).find_map(|line| {
			let (key, value) = line.split_once(':')?;
			key.trim()
				.eq_ignore_ascii_case(name)
				.then_some(value.trim())
		})
	}

	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	pub fn body_json(&self) -> serde_json::Value {
		serde_json::from_slice(&self.body).expect("request body is not JSON")
	}
}

/// Accept one connection, answer it with `status` and `body`, and hand back
/// the captured request. Returns the server's base URL.
pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
	let listener = TcpListener::bind("127.0.0.1:0")
		.await
		.expect("Failed to bind stub server");
	let addr = listener.local_addr().expect("stub server has no address");

	let handle = tokio::spawn(async move {
		let (mut stream, _) = listener.accept().await.expect("accept failed");
		let request = read_request(&mut stream).await;

		let response = format!(
			"HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			status,
			body.len(),
			body
		);
		stream
			.write_all(response.as_bytes())
			.await
			.expect("write failed");
		stream.shutdown().await.ok();

		request
	});

	(format!("http://{}", addr), handle)
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
	let mut buf = Vec::new();
	let mut chunk = [0u8; 4096];

	let head_end = loop {
		let n = stream.read(&mut chunk).await.expect("read failed");
		assert!(n > 0, "connection closed before request head");
		buf.extend_from_slice(&chunk[..n]);
		if let Some(pos) = find(&buf, b"\r\n\r\n") {
			break pos + 4;
		}
	};

	let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
	let content_length = head
		.lines()
		.find_map(|line| {
			let (key, value) = line.split_once(':')?;
			if key.trim().eq_ignore_ascii_case("content-length") {
				value.trim().parse::<usize>().ok()
			} else {
				None
			}
		})
		.unwrap_or(0);

	while buf.len() < head_end + content_length {
		let n = stream.read(&mut chunk).await.expect("read failed");
		assert!(n > 0, "connection closed before request body");
		buf.extend_from_slice(&chunk[..n]);
	}

	CapturedRequest {
		head,
		body: buf[head_end..head_end + content_length].to_vec(),
	}
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack
		.windows(needle.len())
		.position(|window| window == needle)
}

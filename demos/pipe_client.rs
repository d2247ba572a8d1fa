//! Runs a request over an in-memory pipe, playing the server by hand
//!
//! Usage:
//!   RUST_LOG=debug cargo run --example pipe_client

extern crate env_logger;
extern crate rotor_http_client;

use std::rc::Rc;

use rotor_http_client::client::{Connection, Request, Response};
use rotor_http_client::pipe::Pipe;


fn main() {
    env_logger::init();

    let pipe = Pipe::new(1);
    let conn = Connection::new(pipe.clone());
    conn.set_disconnect_callback(|conn: &Rc<Connection<Pipe>>| {
        println!("[conn {}] disconnected", conn.id());
    });

    let mut req = Request::new("GET", "/");
    req.add_header("Host", "localhost").unwrap();
    conn.send_request(&req, |_: &Rc<Connection<Pipe>>, resp: Option<&Response>| {
        match resp {
            Some(resp) => {
                println!("[http] {} {}", resp.status_code(),
                    resp.status_message().unwrap_or(""));
                for (name, value) in resp.headers() {
                    println!("[http]   {}: {}", name, value);
                }
                println!("[http] body: {}", String::from_utf8_lossy(resp.body()));
            }
            None => println!("[http] request failed"),
        }
    }).unwrap();

    let sent = pipe.take_output();
    println!("[pipe] client sent {} bytes:\n{}",
        sent.len(), String::from_utf8_lossy(&sent));

    // Headers and body arrive in separate reads
    pipe.feed(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n");
    pipe.feed(b"hello");
    pipe.hangup();
}

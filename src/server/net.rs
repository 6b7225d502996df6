use bevy::prelude::*;
use std::io::BufReader;
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::ServerConfig;
use crate::http::{HttpError, HttpResponse, read_request};
use crate::routes::route;
use crate::sessions::SessionStore;
use crate::types::*;

const READ_TIMEOUT: Duration = Duration::from_secs(5);
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);
const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Accept connections on a dedicated thread. Each connection gets its own
/// short-lived thread that reads the request and writes the response; the
/// app only routes.
pub fn spawn_listener(listener: TcpListener, sender: Sender<PendingRequest>) {
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let sender = sender.clone();
                    std::thread::spawn(move || read_connection(stream, sender));
                }
                Err(e) => {
                    warn!("accept error: {}", e);
                }
            }
        }
    });
}

fn read_connection(mut stream: TcpStream, sender: Sender<PendingRequest>) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown peer".to_string());

    if let Err(e) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
        warn!("could not set read timeout for {}: {}", peer, e);
    }
    if let Err(e) = stream.set_write_timeout(Some(WRITE_TIMEOUT)) {
        warn!("could not set write timeout for {}: {}", peer, e);
    }

    let request = match stream.try_clone() {
        Ok(read_half) => read_request(&mut BufReader::new(read_half)),
        Err(e) => Err(HttpError::Io(e)),
    };

    match request {
        Ok(request) => {
            let (reply, answer) = std::sync::mpsc::channel();
            if sender.send(PendingRequest { request, reply }).is_err() {
                warn!("dropping request from {}: app is shutting down", peer);
                return;
            }

            match answer.recv_timeout(REPLY_TIMEOUT) {
                Ok(response) => {
                    if let Err(e) = response.write_to(&mut stream) {
                        debug!("failed to answer {}: {}", peer, e);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!("no answer for {} in time", peer);
                    let _ = HttpResponse::text(503, "Service Unavailable").write_to(&mut stream);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("request from {} dropped unanswered", peer);
                }
            }
        }
        Err(HttpError::Malformed(reason)) => {
            debug!("bad request from {}: {}", peer, reason);
            let _ = HttpResponse::text(400, "Bad Request").write_to(&mut stream);
        }
        Err(e) => {
            debug!("connection from {} dropped: {}", peer, e);
        }
    }
}

/// Route every request the listener has handed over since last frame.
/// Never touches a socket, so a slow client cannot stall the app.
pub fn serve_requests_system(
    receiver: Res<PendingRequestReceiver>,
    mut store: ResMut<SessionStore>,
    config: Res<ServerConfig>,
) {
    let recv = receiver.receiver.lock().unwrap();
    while let Ok(PendingRequest { request, reply }) = recv.try_recv() {
        let response = route(&request, &mut store, &config);
        info!("{} {} -> {}", request.method, request.path, response.status);

        if reply.send(response).is_err() {
            warn!("client for {} {} went away", request.method, request.path);
        }
    }
}

pub fn pending_request_channel() -> (Sender<PendingRequest>, PendingRequestReceiver) {
    let (sender, receiver) = std::sync::mpsc::channel::<PendingRequest>();
    (
        sender,
        PendingRequestReceiver {
            receiver: Arc::new(Mutex::new(receiver)),
        },
    )
}

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::difficulty::Difficulty;
use crate::http::{HttpRequest, HttpResponse};

// Response bodies of the JSON API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateGameResponse {
    pub gameid: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameInfoResponse {
    pub difficulty: Difficulty,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PingResponse {
    pub ok: bool,
    pub time: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gameid: Option<String>,
}

// One stored session
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub difficulty: Difficulty,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

// A parsed request waiting for the app to answer it. The response goes
// back to the connection thread, which does the writing.
pub struct PendingRequest {
    pub request: HttpRequest,
    pub reply: Sender<HttpResponse>,
}

// Requests handed over by the listener thread
#[derive(Resource)]
pub struct PendingRequestReceiver {
    pub receiver: Arc<Mutex<Receiver<PendingRequest>>>,
}

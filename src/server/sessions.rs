use bevy::prelude::*;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::difficulty::Difficulty;
use crate::types::GameSession;
use crate::utils::now_millis;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("game not found: {0}")]
    NotFound(String),
}

/// In-memory session map. Entries are never changed or expired and do not
/// survive a restart. Gameplay never reads it.
#[derive(Resource, Default, Debug)]
pub struct SessionStore {
    sessions: HashMap<String, GameSession>,
}

impl SessionStore {
    pub fn create(&mut self, difficulty: Difficulty) -> String {
        let gameid = Uuid::new_v4().to_string();
        self.sessions.insert(
            gameid.clone(),
            GameSession {
                difficulty,
                created_at: now_millis(),
            },
        );
        gameid
    }

    pub fn info(&self, gameid: &str) -> Result<&GameSession, SessionError> {
        self.sessions
            .get(gameid)
            .ok_or_else(|| SessionError::NotFound(gameid.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

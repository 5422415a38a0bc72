//! In-memory collaborators for unit tests.
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use serde_json::Value;

use crate::{
    console::Console,
    crypto::{Cipher, SharedSecretCipher},
    dialogs::Dialogs,
    error::{ConsoleError, Result},
    navigation::{Route, Router},
    transport::{Request, Transport},
};

pub const TEST_SECRET: &str = "test-secret";

pub enum Reply {
    Body(String),
    Status(u16),
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self::Body(value.to_string())
    }

    /// Body whose whole envelope is sealed under `data`.
    pub fn sealed(value: Value) -> Self {
        let cipher = test_cipher();
        let data = cipher.encrypt(value.to_string().as_bytes()).unwrap();
        Self::json(serde_json::json!({ "data": data }))
    }
}

pub fn test_cipher() -> SharedSecretCipher {
    SharedSecretCipher::new(TEST_SECRET).unwrap()
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Form fields of the `index`-th request.
    pub fn fields(&self, index: usize) -> Vec<(String, String)> {
        let body = self.requests()[index].body.clone();
        serde_urlencoded::from_str(&body).unwrap()
    }

    /// Decrypted JSON payload of the `index`-th request.
    pub fn sealed_payload(&self, index: usize) -> Value {
        let fields = self.fields(index);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "data");
        let plain = test_cipher().decrypt(&fields[0].1).unwrap();
        serde_json::from_slice(&plain).unwrap()
    }
}

impl Transport for ScriptedTransport {
    async fn post(&self, request: Request) -> Result<String> {
        let path = request.path;
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(ConsoleError::Status {
                path: path.to_string(),
                status,
            }),
            None => Err(ConsoleError::Status {
                path: path.to_string(),
                status: 503,
            }),
        }
    }
}

pub struct RecordingDialogs {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
}

impl RecordingDialogs {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            alerts: Mutex::default(),
            confirms: Mutex::default(),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }
}

#[derive(Default)]
pub struct RecordingRouter {
    routes: Mutex<Vec<Route>>,
}

impl RecordingRouter {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Router for RecordingRouter {
    fn go(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub type TestConsole = Console<ScriptedTransport, RecordingDialogs, RecordingRouter>;

/// Console answering with `replies` in order and confirming every question.
pub fn test_console(replies: Vec<Reply>) -> TestConsole {
    console_answering(replies, true)
}

/// Like [`test_console`], but every confirmation is declined.
pub fn declining_console(replies: Vec<Reply>) -> TestConsole {
    console_answering(replies, false)
}

fn console_answering(replies: Vec<Reply>, answer: bool) -> TestConsole {
    let transport = ScriptedTransport {
        replies: Mutex::new(replies.into()),
        requests: Mutex::default(),
    };
    Console::new(
        transport,
        Arc::new(test_cipher()),
        RecordingDialogs::new(answer),
        RecordingRouter::default(),
    )
}

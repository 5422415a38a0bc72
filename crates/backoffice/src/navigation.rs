use serde_json::Value;

use crate::codec::Payload;

/// A named client-side state plus its parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    pub name: String,
    pub params: Payload,
}

impl Route {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Payload::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// Routing service that moves the operator to another state.
pub trait Router: Send + Sync {
    fn go(&self, route: Route);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_kept() {
        let route = Route::new("merchant.list").param("merchant_code", "M001");
        assert_eq!(route.name, "merchant.list");
        assert_eq!(route.params["merchant_code"], "M001");
    }
}

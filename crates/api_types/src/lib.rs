use serde::{Deserialize, Serialize};

/// Lenient field decoders for the PHP backend.
///
/// The backend is loose about JSON types: ids and statuses arrive either as
/// numbers or strings, and some free-text columns are stored percent-encoded.
pub mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    impl Scalar {
        fn into_string(self) -> String {
            match self {
                Self::Text(text) => text,
                Self::Int(n) => n.to_string(),
                Self::Float(n) => n.to_string(),
                Self::Bool(b) => b.to_string(),
            }
        }
    }

    /// Decodes a percent-encoded value, keeping the raw text if it is not
    /// valid UTF-8 once decoded.
    pub fn percent_decode(raw: &str) -> String {
        urlencoding::decode(raw)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw.to_string())
    }

    pub fn stringly<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Scalar::deserialize(deserializer).map(Scalar::into_string)
    }

    pub fn opt_stringly<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
    }

    pub fn percent_decoded<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(percent_decode(&raw))
    }

    pub fn opt_percent_decoded<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.map(|raw| percent_decode(&raw)))
    }
}

pub mod envelope {
    use super::*;
    use serde_json::Value;

    /// Body sent to endpoints that expect an encrypted payload.
    ///
    /// `data` holds the ciphertext of the JSON-serialized request mapping.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Sealed {
        pub data: String,
    }

    /// Response body shared by every back-office endpoint.
    ///
    /// Rows are carried either in `records` or, for some endpoints, in
    /// `data` (possibly after decryption).
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ResponseEnvelope {
        #[serde(default, deserialize_with = "de::stringly")]
        pub status: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub data: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub records: Option<Vec<Value>>,
    }
}

pub mod merchant {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum MerchantStatus {
        #[default]
        Active,
        Inactive,
    }

    impl MerchantStatus {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Active => "active",
                Self::Inactive => "inactive",
            }
        }
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MerchantRow {
        #[serde(deserialize_with = "de::stringly")]
        pub id: String,
        pub merchant_code: String,
        #[serde(deserialize_with = "de::percent_decoded")]
        pub merchant_name: String,
        #[serde(deserialize_with = "de::stringly")]
        pub status: String,
        #[serde(default)]
        pub contact_email: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    /// Create (no `id`) or update (with `id`) a merchant.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MerchantSave {
        pub id: Option<String>,
        pub merchant_code: String,
        pub merchant_name: String,
        pub status: MerchantStatus,
    }
}

pub mod bank_account {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BankAccountRow {
        #[serde(deserialize_with = "de::stringly")]
        pub id: String,
        pub merchant_code: String,
        pub bank_name: String,
        #[serde(deserialize_with = "de::stringly")]
        pub account_no: String,
        #[serde(deserialize_with = "de::percent_decoded")]
        pub account_name: String,
        #[serde(default, deserialize_with = "de::opt_stringly")]
        pub status: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BankAccountSave {
        pub id: Option<String>,
        pub merchant_code: String,
        pub bank_name: String,
        pub account_no: String,
        pub account_name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BankAccountDelete {
        pub id: String,
    }
}

pub mod agent_group {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct AgentGroupRow {
        #[serde(deserialize_with = "de::stringly")]
        pub id: String,
        #[serde(deserialize_with = "de::percent_decoded")]
        pub group_name: String,
        #[serde(default, deserialize_with = "de::opt_percent_decoded")]
        pub description: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AgentGroupSave {
        pub id: Option<String>,
        pub group_name: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AgentGroupDelete {
        pub id: String,
    }
}

pub mod whitelist {
    use super::*;

    /// An IP address allowed to call the platform on behalf of a merchant.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct WhitelistEntryRow {
        #[serde(deserialize_with = "de::stringly")]
        pub id: String,
        pub merchant_code: String,
        pub ip_address: String,
        #[serde(default, deserialize_with = "de::opt_percent_decoded")]
        pub remark: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WhitelistAdd {
        pub merchant_code: String,
        pub ip_address: String,
        pub remark: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WhitelistDelete {
        pub id: String,
    }
}

pub mod sms_ack {
    use super::*;

    /// Delivery acknowledgement of an SMS sent to an agent or customer.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SmsAckRow {
        #[serde(deserialize_with = "de::stringly")]
        pub id: String,
        pub account: String,
        pub phone: String,
        /// Transaction reference the SMS belongs to; several acks may share it.
        pub reference: String,
        #[serde(deserialize_with = "de::percent_decoded")]
        pub message: String,
        #[serde(deserialize_with = "de::stringly")]
        pub ack_status: String,
        pub sent_at: String,
        #[serde(default)]
        pub ack_at: Option<String>,
    }
}

pub mod adjustment {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct AdjustmentRow {
        #[serde(deserialize_with = "de::stringly")]
        pub id: String,
        pub account: String,
        /// Signed decimal amount as sent by the backend (e.g. `"-12.50"`).
        #[serde(deserialize_with = "de::stringly")]
        pub amount: String,
        #[serde(deserialize_with = "de::percent_decoded")]
        pub reason: String,
        #[serde(default)]
        pub operator: Option<String>,
        pub created_at: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdjustmentExecute {
        pub account: String,
        /// Signed decimal amount, at most two fraction digits.
        pub amount: String,
        pub reason: String,
    }
}

pub mod callback {
    use super::*;

    /// A merchant service endpoint the platform notifies about transactions.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CallbackRow {
        #[serde(deserialize_with = "de::stringly")]
        pub id: String,
        pub merchant_code: String,
        pub service_name: String,
        #[serde(deserialize_with = "de::percent_decoded")]
        pub callback_url: String,
        #[serde(deserialize_with = "de::stringly")]
        pub status: String,
        #[serde(default)]
        pub last_attempt_at: Option<String>,
        #[serde(default, deserialize_with = "de::opt_stringly")]
        pub retries: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CallbackSave {
        pub id: String,
        pub callback_url: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CallbackResend {
        pub id: String,
    }
}

/// Integers sent as JSON strings, e.g. `"balance": "500"`.
///
/// Bare JSON numbers are rejected.
pub mod string_int {
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|err| de::Error::custom(format!("invalid integer string {raw:?}: {err}")))
    }
}

pub mod account {
    use serde::{Deserialize, Serialize};

    use super::string_int;

    // Missing fields decode to their zero value.

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CreateAccount {
        #[serde(rename = "firstName")]
        pub first_name: String,
        #[serde(rename = "lastName")]
        pub last_name: String,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct UpdateAccount {
        #[serde(rename = "firstName")]
        pub first_name: String,
        #[serde(rename = "lastName")]
        pub last_name: String,
        #[serde(with = "string_int")]
        pub balance: i64,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct DeleteAccount {
        #[serde(with = "string_int")]
        pub id: i64,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct TransferFunds {
        #[serde(rename = "toAccount", with = "string_int")]
        pub to_account: i64,
        #[serde(with = "string_int")]
        pub amount: i64,
    }
}

pub mod envelope {
    use serde::Serialize;

    /// Success body: `{"message": ..., "data"?: ...}`.
    #[derive(Debug, Clone, Serialize)]
    pub struct Envelope<T> {
        pub message: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub data: Option<T>,
    }

    impl Envelope<()> {
        pub fn message(message: &'static str) -> Self {
            Self {
                message,
                data: None,
            }
        }
    }

    impl<T> Envelope<T> {
        pub fn with_data(message: &'static str, data: T) -> Self {
            Self {
                message,
                data: Some(data),
            }
        }
    }

    /// Body sent with a success status when an update targets a missing account.
    #[derive(Debug, Clone, Serialize)]
    pub struct MissingAccount {
        pub error: String,
    }

    impl MissingAccount {
        pub fn new(id: i64) -> Self {
            Self {
                error: format!("can't find account: {id}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{account::*, envelope::*};

    #[test]
    fn decode_string_encoded_integers() {
        let dto: UpdateAccount =
            serde_json::from_str(r#"{"firstName":"A","lastName":"B","balance":"500"}"#).unwrap();
        assert_eq!(
            dto,
            UpdateAccount {
                first_name: "A".into(),
                last_name: "B".into(),
                balance: 500,
            }
        );

        let dto: TransferFunds =
            serde_json::from_str(r#"{"toAccount":"3","amount":"-25"}"#).unwrap();
        assert_eq!(dto.to_account, 3);
        assert_eq!(dto.amount, -25);
    }

    #[test]
    fn reject_bare_numbers_and_garbage() {
        assert!(serde_json::from_str::<TransferFunds>(r#"{"toAccount":3,"amount":"1"}"#).is_err());
        assert!(serde_json::from_str::<DeleteAccount>(r#"{"id":"one"}"#).is_err());
        assert!(serde_json::from_str::<CreateAccount>("{").is_err());
    }

    #[test]
    fn missing_fields_are_zero_values() {
        let dto: CreateAccount = serde_json::from_str("{}").unwrap();
        assert_eq!(dto, CreateAccount::default());

        let dto: TransferFunds = serde_json::from_str(r#"{"amount":"10"}"#).unwrap();
        assert_eq!(dto.to_account, 0);
    }

    #[test]
    fn envelope_omits_absent_data() {
        let body = serde_json::to_string(&Envelope::message("account created")).unwrap();
        assert_eq!(body, r#"{"message":"account created"}"#);

        let body = serde_json::to_string(&Envelope::with_data("success", [1, 2])).unwrap();
        assert_eq!(body, r#"{"message":"success","data":[1,2]}"#);

        let body = serde_json::to_string(&MissingAccount::new(9)).unwrap();
        assert_eq!(body, r#"{"error":"can't find account: 9"}"#);
    }
}

use super::{helpers, validation, MessageDirection, WampMessage};
use crate::roles::Roles;
use serde::{de, Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
/// # Abort - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-abort-2)
/// Represents an Abort message in the WAMP protocol. Carries `args`/`kwargs`
/// so a client can promote a received Abort into an `ApplicationError`
/// exposing the router's structured reason.
/// ## Examples
/// ```
/// use wamp_core::messages::Abort;
/// use wamp_core::abort;
/// use serde_json::json;
/// # let mut abort_message2 = abort!("wamp.error.no_such_realm");
///
/// let abort_message = Abort {
///     reason: "wamp.error.no_such_realm".to_string(),
///     details: json!({}),
///     args: Value::Null,
///     kwargs: Value::Null,
/// };
///
/// # assert_eq!(abort_message, abort_message2);
/// ```
/// ### Serializer
/// ```
/// use wamp_core::messages::Abort;
/// use serde_json::{json, to_string};
///
/// let abort = Abort {
///     details: json!({ "message": "The realm does not exist." }),
///     reason: "wamp.error.no_such_realm".to_string(),
///     args: serde_json::Value::Null,
///     kwargs: serde_json::Value::Null,
/// };
///
/// let data = r#"[3,{"message":"The realm does not exist."},"wamp.error.no_such_realm"]"#;
/// assert_eq!(to_string(&abort).unwrap(), data);
/// ```
/// ### Deserializer
/// ```
/// use wamp_core::messages::Abort;
/// use serde_json::from_str;
///
/// let data = r#"[3,{"message":"The realm does not exist."},"wamp.error.no_such_realm"]"#;
/// let abort = from_str::<Abort>(data).unwrap();
/// assert_eq!(abort.reason, "wamp.error.no_such_realm");
/// ```
pub struct Abort {
    pub details: Value,
    pub reason: String,
    pub args: Value,
    pub kwargs: Value,
}

#[macro_export]
/// # Abort Macro - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-abort-2)
macro_rules! abort {
    ($reason:expr) => {
        abort! {$reason, serde_json::json!({})}
    };

    ($reason:expr, $details:expr) => {
        Abort {
            details: $details,
            reason: $reason.to_string(),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
        }
    };

    ($reason:expr, $details:expr, args: $args:expr, kwargs: $kwargs:expr) => {
        Abort {
            details: $details,
            reason: $reason.to_string(),
            args: $args,
            kwargs: $kwargs,
        }
    };
}

impl WampMessage for Abort {
    const ID: u64 = 3;

    fn direction(role: crate::roles::Roles) -> &'static super::MessageDirection {
        match role {
            Roles::Callee => &MessageDirection {
                receives: &true,
                sends: &false,
            },
            Roles::Caller => &MessageDirection {
                receives: &true,
                sends: &false,
            },
            Roles::Publisher => &MessageDirection {
                receives: &true,
                sends: &false,
            },
            Roles::Subscriber => &MessageDirection {
                receives: &true,
                sends: &false,
            },
            Roles::Dealer => &MessageDirection {
                receives: &false,
                sends: &true,
            },
            Roles::Broker => &MessageDirection {
                receives: &false,
                sends: &true,
            },
        }
    }
}

impl Serialize for Abort {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let details =
            helpers::ser_value_is_object::<S, _>(&self.details, "Details must be object like.")?;
        let args =
            helpers::ser_value_is_args::<S, _>(&self.args, "Args must be Array like or Null.")?;
        let kwargs = helpers::ser_value_is_kwargs::<S, _>(
            &self.kwargs,
            "Kwargs must be Object like or Null.",
        )?;
        match (args.is_null(), kwargs.is_null()) {
            (true, true) => (Self::ID, details, &self.reason).serialize(serializer),
            (false, true) => (Self::ID, details, &self.reason, args).serialize(serializer),
            (true, false) => {
                (Self::ID, details, &self.reason, serde_json::json!([]), kwargs)
                    .serialize(serializer)
            }
            (false, false) => (Self::ID, details, &self.reason, args, kwargs).serialize(serializer),
        }
    }
}

static ABORT_SPEC: validation::ValidationSpec = validation::ValidationSpec {
    min_length: 3,
    max_length: 5,
    text: "Abort",
    fields: &[
        (1, validation::validate_mapping),
        (2, validation::validate_string),
    ],
};

impl<'de> Deserialize<'de> for Abort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let components: Vec<Value> = Deserialize::deserialize(deserializer)?;
        validation::sanity_check(&components, Self::ID, &ABORT_SPEC).map_err(de::Error::custom)?;
        let details = components[1].clone();
        let reason = components[2].as_str().unwrap_or_default().to_string();
        let (args, kwargs) =
            validation::optional_args_kwargs(&components, 3).map_err(de::Error::custom)?;
        Ok(Abort {
            reason,
            details,
            args,
            kwargs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Abort;
    use serde_json::{from_str, json, to_string};

    #[test]
    fn round_trips_without_args_kwargs() {
        let abort = Abort {
            details: json!({}),
            reason: "wamp.error.no_such_realm".to_string(),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
        };
        let data = to_string(&abort).unwrap();
        assert_eq!(from_str::<Abort>(&data).unwrap(), abort);
    }

    #[test]
    fn round_trips_with_kwargs_only() {
        let abort = Abort {
            details: json!({}),
            reason: "wamp.error.no_such_realm".to_string(),
            args: serde_json::Value::Null,
            kwargs: json!({"message": "no such realm"}),
        };
        let data = to_string(&abort).unwrap();
        let back: Abort = from_str(&data).unwrap();
        assert_eq!(back.kwargs, abort.kwargs);
        assert_eq!(back.args, json!([]));
    }
}

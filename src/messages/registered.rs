use super::{validation, MessageDirection, WampMessage};
use crate::roles::Roles;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
/// # Registered - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-registered-2)
/// Represents an Registered message in the WAMP protocol.
/// ## Examples
/// ```
/// use wamp_core::messages::Registered;
/// use wamp_core::registered;
/// use serde_json::json;
///
/// # let mut registered_message2 = registered!(1, 2);
///
/// let registered_message = Registered {
///     request_id: 1,
///     registration: 2
/// };
///
/// # assert_eq!(registered_message, registered_message2);
/// ```
/// ### Serializer
/// Implements serde Serialize trait for registered
/// ```
/// use wamp_core::messages::Registered;
/// use serde_json::{json, to_string};
///
/// // Create an registered message
/// let registered = Registered {
///     request_id: 1,
///     registration: 2
/// };
///
/// // Establish raw json data string
/// let data = r#"[65,1,2]"#;
///
/// // Here we convert it from an `registered` frame, to a string representation.
/// let registered = to_string(&registered).unwrap();
///
/// // Confirm that our registered frame strings are equal to each other
/// assert_eq!(registered, data);
/// ```
/// ### Deserializer
/// Implements serde Deserialize trait for registered
/// ```
/// use wamp_core::messages::Registered;
/// use serde_json::from_str;
///
/// // Here is our raw json data string
/// let data = r#"[65,1,2]"#;
///
/// // Here we convert it to an `Registered` frame
/// let registered = from_str::<Registered>(data).unwrap();
///
/// // Confirm that our request_id and registration deserialized
/// assert_eq!(registered.request_id, 1);
/// assert_eq!(registered.registration, 2);
/// ```
pub struct Registered {
    pub request_id: u64,
    pub registration: u64,
}

#[macro_export]
/// # Registered Macro - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-registered-2)
/// Macro that allows for creating Registered wamp message.
/// ## Examples
/// ```
/// use wamp_core::messages::{self, Registered};
/// use wamp_core::registered;
/// use serde_json::json;
///
/// let mut registered_message = registered!(1, 2);
/// let registered_message2 = registered!(1, 3);
///
/// assert_ne!(registered_message, registered_message2);
///
/// // These macro invocations are the same as the following:
/// let registered_message3 = Registered {
///     request_id: 1,
///     registration: 2
/// };
///
/// assert_eq!(registered_message, registered_message3);
/// assert_ne!(registered_message2, registered_message3);
/// ```
macro_rules! registered {
    ($request_id:expr, $registration:expr) => {
        Registered {
            request_id: $request_id,
            registration: $registration,
        }
    };
}

impl WampMessage for Registered {
    const ID: u64 = 65;

    fn direction(role: Roles) -> &'static MessageDirection {
        match role {
            Roles::Callee => &MessageDirection {
                receives: &true,
                sends: &false,
            },
            Roles::Caller => &MessageDirection {
                receives: &false,
                sends: &false,
            },
            Roles::Publisher => &MessageDirection {
                receives: &false,
                sends: &false,
            },
            Roles::Subscriber => &MessageDirection {
                receives: &false,
                sends: &false,
            },
            Roles::Dealer => &MessageDirection {
                receives: &false,
                sends: &true,
            },
            Roles::Broker => &MessageDirection {
                receives: &false,
                sends: &false,
            },
        }
    }
}

impl Serialize for Registered {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (Self::ID, &self.request_id, &self.registration).serialize(serializer)
    }
}

static REGISTERED_SPEC: validation::ValidationSpec = validation::ValidationSpec {
    min_length: 3,
    max_length: 3,
    text: "Registered",
    fields: &[(1, validation::validate_id), (2, validation::validate_id)],
};

impl<'de> Deserialize<'de> for Registered {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let components: Vec<Value> = Deserialize::deserialize(deserializer)?;
        validation::sanity_check(&components, Self::ID, &REGISTERED_SPEC)
            .map_err(de::Error::custom)?;
        Ok(Registered {
            request_id: components[1].as_u64().unwrap_or_default(),
            registration: components[2].as_u64().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{from_str, to_string};

    use super::Registered;

    #[test]
    fn test() {
        let d1 = r#"[65,25349185,2103333224]"#;
        let p1 = Registered {
            request_id: 25349185,
            registration: 2103333224,
        };
        assert_eq!(d1, to_string(&p1).unwrap());
        assert_eq!(from_str::<Registered>(d1).unwrap(), p1);
    }
}

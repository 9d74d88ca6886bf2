use super::{helpers, validation, MessageDirection, WampMessage};
use crate::roles::Roles;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
/// # Call - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-call-2)
///  Represents an Call message in the WAMP protocol.
/// ## Examples
/// ```
/// use wamp_core::messages::Call;
/// use wamp_core::call;
/// use serde_json::{json, Value};
///
/// let call = Call {
///     request_id: 1,
///     options: json!({ }),
///     procedure: "procedure".to_string(),
///     args: Value::Null,
///     kwargs: Value::Null,
///     payload: None,
///     payload_serializer: None,
/// };
///
/// let call2 = call!("procedure");
///
/// assert_eq!(call, call2);
/// ```
/// ### Serializer
/// Serde Serialize trait implementation for Call.
/// ```
/// use wamp_core::messages::Call;
/// use serde_json::{json, to_string};
///
/// let call = Call {
///     request_id: 7814135,
///     options: json!({}),
///     procedure: "com.myapp.user.new".to_string(),
///     args: json!(["johnny"]),
///     kwargs: json!({"firstname":"John","surname":"Doe"}),
///     payload: None,
///     payload_serializer: None,
/// };
///
/// let call2_string = r#"[48,7814135,{},"com.myapp.user.new",["johnny"],{"firstname":"John","surname":"Doe"}]"#;
///
/// let call_string = to_string(&call).unwrap();
/// assert_eq!(call_string, call2_string);
/// ```
/// ### Deserializer
/// Serde Deserialize trait implementation for Call.
/// ```
/// use wamp_core::messages::Call;
/// use serde_json::{json, from_str};
///
/// let call = Call {
///     request_id: 7814135,
///     options: json!({}),
///     procedure: "com.myapp.user.new".to_string(),
///     args: json!(["johnny"]),
///     kwargs: json!({"firstname":"John","surname":"Doe"}),
///     payload: None,
///     payload_serializer: None,
/// };
///
/// let call2_string = r#"[48,7814135,{},"com.myapp.user.new",["johnny"],{"firstname":"John","surname":"Doe"}]"#;
///
/// let call2 = from_str::<Call>(call2_string).unwrap();
/// assert_eq!(call, call2);
/// ```
pub struct Call {
    pub request_id: u64,
    pub options: Value,
    pub procedure: String,
    pub args: Value,
    pub kwargs: Value,
    /// Opaque pre-serialized `args`/`kwargs` blob; carried in place of the
    /// structured fields when set. See [`payload_serializer`](Self::payload_serializer).
    pub payload: Option<Vec<u8>>,
    /// Inner serializer id naming how `payload` was encoded. Mirrored into
    /// the wire `options` as `x_payload_serializer` on serialize.
    pub payload_serializer: Option<u8>,
}

#[macro_export]
/// ## Call Macro - [wamp-proto](https://wamp-proto.org/wamp_latest_ietf.html#name-call-2)
/// Call message builder with thread safe auto-incrementing request-ids.
/// ### Examples
/// ```
/// use wamp_core::call;
/// use wamp_core::messages::Call;
/// use serde_json::{json, Value};
///
/// // Create a call message with default values
/// let call = call!("procedure");
///
/// // Which is the same as creating this:
/// let call2 = Call {
///     procedure: "procedure".to_string(),
///     request_id: 1,
///     options: json!({}),
///     args: Value::Null,
///     kwargs: Value::Null,
///     payload: None,
///     payload_serializer: None,
/// };
///
/// assert_eq!(call, call2);
///
/// // Some other ways you can construct it using the macro
///
/// // Create a call with custom options but empty args and kwargs
/// let _ = call!("procedure", json!( { "key": "value" } ));
///
/// // Create a call with custom args or kwargs, but empty options
/// let _ = call!("procedure", args: json!( [ 1, 2, 3 ] ));
/// let _ = call!("procedure", kwargs: json!( { "key": "value" } ));
///
/// // Create a call with custom args and kwargs, but empty options
/// let _ = call!("procedure", args: json!([ 1, 2, 3 ]), kwargs: json!({ "key": "value" }));
///
/// // Create a call with custom options, and either custom args OR custom kwargs
/// let _ = call!("procedure", json!( { "key": "value" } ), args: json!( [ 1, 2, 3 ] ));
/// let _ = call!("procedure", json!( { "key": "value" } ), kwargs: json!( { "key": "value" } ));
///
/// // Create a call with custom options, and both custom args and kwargs
/// // Note that when you use all "required" arguments for the struuct, keyword arguments should not be used for args and kwargs
/// let _ = call!("procedure", json!({}), json!([]), json!({}));
/// ```
macro_rules! call {
    ($procedure:expr) => {
        call! {$procedure, serde_json::json!({}), serde_json::Value::Null, serde_json::Value::Null}
    };

    ($procedure:expr, $options:expr) => {
        call! {$procedure, $options, serde_json::Value::Null, serde_json::Value::Null}
    };

    ($procedure:expr, args: $args:expr) => {
        call! {$procedure, serde_json::json!({}), $args, serde_json::Value::Null}
    };

    ($procedure:expr, kwargs: $kwargs:expr) => {
        call! {$procedure, serde_json::json!({}), serde_json::Value::Null, $kwargs}
    };

    ($procedure:expr, args: $args:expr, kwargs: $kwargs:expr) => {
        call! {$procedure, serde_json::json!({}), $args, $kwargs}
    };

    ($procedure:expr, $options:expr, args: $args:expr) => {
        call! {$procedure, $options, $args, serde_json::Value::Null}
    };

    ($procedure:expr, $options:expr, kwargs: $kwargs:expr) => {
        call! {$procedure, $options, serde_json::Value::Null, $kwargs}
    };

    ($procedure:expr, $options:expr, $args:expr, $kwargs:expr) => {{
        $crate::messages::Call {
            request_id: $crate::factories::increment(),
            options: $options,
            procedure: $procedure.to_string(),
            args: $args,
            kwargs: $kwargs,
            payload: None,
            payload_serializer: None,
        }
    }};
}

impl WampMessage for Call {
    const ID: u64 = 48;

    fn direction(role: Roles) -> &'static MessageDirection {
        match role {
            Roles::Callee => &MessageDirection {
                receives: &false,
                sends: &false,
            },
            Roles::Caller => &MessageDirection {
                receives: &false,
                sends: &true,
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

impl Serialize for Call {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let options =
            helpers::ser_value_is_object::<S, _>(&self.options, "Options must be object like.")?;

        if let (Some(payload), Some(sid)) = (&self.payload, self.payload_serializer) {
            let mut options = options.clone();
            helpers::inject_x_payload_serializer(&mut options, sid);
            return (
                Self::ID,
                &self.request_id,
                options,
                &self.procedure,
                helpers::wire_encode_payload(payload),
            )
                .serialize(serializer);
        }

        let args =
            helpers::ser_value_is_args::<S, _>(&self.args, "Args must be Array like or Null.")?;
        let kwargs = helpers::ser_value_is_kwargs::<S, _>(
            &self.kwargs,
            "Kwargs must be Object like or Null.",
        )?;
        if args.is_null() {
            if kwargs.is_null() {
                (Self::ID, &self.request_id, options, &self.procedure).serialize(serializer)
            } else {
                (
                    Self::ID,
                    &self.request_id,
                    options,
                    &self.procedure,
                    json!([]),
                    kwargs,
                )
                    .serialize(serializer)
            }
        } else {
            if kwargs.is_null() {
                (Self::ID, &self.request_id, options, &self.procedure, args).serialize(serializer)
            } else {
                (
                    Self::ID,
                    &self.request_id,
                    options,
                    &self.procedure,
                    args,
                    kwargs,
                )
                    .serialize(serializer)
            }
        }
    }
}

static CALL_SPEC: validation::ValidationSpec = validation::ValidationSpec {
    min_length: 4,
    max_length: 6,
    text: "Call",
    fields: &[
        (1, validation::validate_id),
        (2, validation::validate_mapping),
        (3, validation::validate_string),
    ],
};

impl<'de> Deserialize<'de> for Call {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let components: Vec<Value> = Deserialize::deserialize(deserializer)?;
        validation::sanity_check(&components, Self::ID, &CALL_SPEC).map_err(de::Error::custom)?;
        let request_id = components[1].as_u64().unwrap_or_default();
        let options = components[2].clone();
        let procedure = components[3].as_str().unwrap_or_default().to_string();

        if let Some(sid) = helpers::extract_x_payload_serializer(&options) {
            let payload = components
                .get(4)
                .map(helpers::wire_decode_payload)
                .transpose()
                .map_err(de::Error::custom)?;
            return Ok(Call {
                request_id,
                options,
                procedure,
                args: Value::Null,
                kwargs: Value::Null,
                payload,
                payload_serializer: Some(sid),
            });
        }

        let (args, kwargs) =
            validation::optional_args_kwargs(&components, 4).map_err(de::Error::custom)?;
        Ok(Call {
            request_id,
            options,
            procedure,
            args,
            kwargs,
            payload: None,
            payload_serializer: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Call;
    use serde_json::{from_str, json, to_string, Value};

    #[test]
    fn payload_round_trips_and_tags_options_with_x_payload_serializer() {
        let call = Call {
            request_id: 1,
            options: json!({}),
            procedure: "com.myapp.echo".to_string(),
            args: Value::Null,
            kwargs: Value::Null,
            payload: Some(b"opaque bytes".to_vec()),
            payload_serializer: Some(1),
        };
        let wire = to_string(&call).unwrap();
        assert!(wire.contains(r#""x_payload_serializer":1"#));

        let decoded: Call = from_str(&wire).unwrap();
        assert_eq!(decoded.payload, call.payload);
        assert_eq!(decoded.payload_serializer, call.payload_serializer);
        assert!(decoded.args.is_null());
        assert!(decoded.kwargs.is_null());
    }
}

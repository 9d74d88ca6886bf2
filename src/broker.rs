//! Pub-sub routing core: tracks topic subscriptions across sessions and
//! fans a Publish out into one Event per subscriber. Grounded in
//! `wampproto.broker`, expanded per spec so that `options.acknowledge=true`
//! always yields a Published acknowledgement to the publisher, even when
//! the topic has no subscribers — the source returns nothing at all in
//! that case.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::error::Error;
use crate::id::SessionScopeIdGenerator;
use crate::messages::{Event, Publish, Published, Subscribe, Subscribed, Unsubscribe, Unsubscribed};
use crate::types::{MessageWithRecipient, Publication, SessionDetails, Subscription};

/// Server-side pub-sub routing state for one realm.
#[derive(Debug, Default)]
pub struct Broker {
    subscriptions_by_topic: HashMap<String, Subscription>,
    subscriptions_by_session: HashMap<u64, HashMap<u64, Subscription>>,
    sessions: HashMap<u64, SessionDetails>,
    ids: SessionScopeIdGenerator,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_session(&mut self, details: SessionDetails) -> Result<(), Error> {
        if self.sessions.contains_key(&details.session_id) {
            return Err(Error::ProtocolState {
                state: "broker",
                message: format!("session {} already exists", details.session_id),
            });
        }
        self.sessions.insert(details.session_id, details);
        Ok(())
    }

    /// Removes a session and cascades: strips it from every subscription's
    /// subscriber set, dropping subscriptions (and their topic index entry)
    /// left with no subscriber.
    pub fn remove_session(&mut self, session_id: u64) {
        tracing::debug!(session_id, "broker removing session");
        self.sessions.remove(&session_id);
        if let Some(owned) = self.subscriptions_by_session.remove(&session_id) {
            for (subscription_id, _) in owned {
                if let Some(topic_entry) = self
                    .subscriptions_by_topic
                    .values_mut()
                    .find(|s| s.id == subscription_id)
                {
                    topic_entry.subscribers.remove(&session_id);
                    if topic_entry.subscribers.is_empty() {
                        let topic = topic_entry.topic.clone();
                        self.subscriptions_by_topic.remove(&topic);
                    }
                }
            }
        }
    }

    fn require_session(&self, session_id: u64) -> Result<(), Error> {
        if self.sessions.contains_key(&session_id) {
            Ok(())
        } else {
            Err(Error::ProtocolState {
                state: "broker",
                message: format!("session {session_id} does not exist"),
            })
        }
    }

    pub fn receive_subscribe(&mut self, session_id: u64, subscribe: Subscribe) -> Result<MessageWithRecipient, Error> {
        self.require_session(session_id)?;
        let subscription = self.subscriptions_by_topic.entry(subscribe.topic.clone()).or_insert_with(|| Subscription {
            id: self.ids.next(),
            topic: subscribe.topic.clone(),
            subscribers: HashSet::new(),
        });
        subscription.subscribers.insert(session_id);
        let subscription = subscription.clone();

        self.subscriptions_by_session
            .entry(session_id)
            .or_default()
            .insert(subscription.id, subscription.clone());

        Ok(MessageWithRecipient::new(
            Subscribed {
                request_id: subscribe.request_id,
                subscription: subscription.id,
            },
            session_id,
        ))
    }

    pub fn receive_unsubscribe(&mut self, session_id: u64, unsubscribe: Unsubscribe) -> Result<MessageWithRecipient, Error> {
        self.require_session(session_id)?;
        let owned = self.subscriptions_by_session.get_mut(&session_id);
        let Some(subscription) = owned.and_then(|m| m.remove(&unsubscribe.subscription)) else {
            return Err(Error::ProtocolState {
                state: "broker",
                message: format!("subscription {} does not belong to session {session_id}", unsubscribe.subscription),
            });
        };

        if let Some(topic_entry) = self.subscriptions_by_topic.get_mut(&subscription.topic) {
            topic_entry.subscribers.remove(&session_id);
            if topic_entry.subscribers.is_empty() {
                self.subscriptions_by_topic.remove(&subscription.topic);
            }
        }

        Ok(MessageWithRecipient::new(
            Unsubscribed { request_id: unsubscribe.request_id },
            session_id,
        ))
    }

    /// Fans a Publish out to every subscriber of its topic as one shared
    /// Event, plus an optional Published acknowledgement to the publisher
    /// when `options.acknowledge=true` — issued even with no subscribers.
    pub fn receive_publish(&mut self, session_id: u64, publish: Publish) -> Result<Publication, Error> {
        self.require_session(session_id)?;
        let publication_id = self.ids.next();
        let acknowledge = publish.options.get("acknowledge").and_then(Value::as_bool) == Some(true);

        let subscription = self.subscriptions_by_topic.get(&publish.topic);
        let recipients: Vec<u64> = subscription
            .map(|s| s.subscribers.iter().copied().collect())
            .unwrap_or_default();

        let event = if recipients.is_empty() {
            tracing::trace!(topic = %publish.topic, "publish with no subscribers");
            None
        } else {
            Some(
                Event {
                    subscription: subscription.expect("non-empty recipients implies a subscription").id,
                    publication: publication_id,
                    details: serde_json::json!({}),
                    args: publish.args,
                    kwargs: publish.kwargs,
                    payload: None,
                    payload_serializer: None,
                }
                .into(),
            )
        };

        let ack = acknowledge.then(|| {
            MessageWithRecipient::new(
                Published {
                    request_id: publish.request_id,
                    publication: publication_id,
                },
                session_id,
            )
        });

        Ok(Publication { event, recipients, ack })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Messages;
    use serde_json::json;

    fn session(id: u64) -> SessionDetails {
        SessionDetails::new(id, "realm1", "user", "user")
    }

    #[test]
    fn subscribe_then_publish_fans_out() {
        let mut broker = Broker::new();
        broker.add_session(session(1)).unwrap();
        broker.add_session(session(2)).unwrap();

        let subscribed = broker
            .receive_subscribe(1, Subscribe { request_id: 1, options: json!({}), topic: "news".to_string() })
            .unwrap();
        assert_eq!(subscribed.recipient, 1);

        let publication = broker
            .receive_publish(2, Publish { request_id: 2, options: json!({}), topic: "news".to_string(), args: Value::Null, kwargs: Value::Null })
            .unwrap();
        assert_eq!(publication.recipients, vec![1]);
        assert!(publication.event.is_some());
        assert!(publication.ack.is_none());
    }

    #[test]
    fn publish_with_acknowledge_and_no_subscribers_still_acks() {
        let mut broker = Broker::new();
        broker.add_session(session(1)).unwrap();

        let publication = broker
            .receive_publish(1, Publish { request_id: 3, options: json!({"acknowledge": true}), topic: "empty".to_string(), args: Value::Null, kwargs: Value::Null })
            .unwrap();
        assert!(publication.recipients.is_empty());
        assert!(publication.event.is_none());
        let ack = publication.ack.unwrap();
        assert_eq!(ack.recipient, 1);
        match ack.message {
            Messages::Published(p) => assert_eq!(p.request_id, 3),
            other => panic!("expected Published, got {other:?}"),
        }
    }

    #[test]
    fn unsubscribe_removes_empty_topic_index() {
        let mut broker = Broker::new();
        broker.add_session(session(1)).unwrap();
        let subscribed = broker
            .receive_subscribe(1, Subscribe { request_id: 1, options: json!({}), topic: "news".to_string() })
            .unwrap();
        let subscription_id = match subscribed.message {
            Messages::Subscribed(s) => s.subscription,
            _ => unreachable!(),
        };
        broker.receive_unsubscribe(1, Unsubscribe { request_id: 2, subscription: subscription_id }).unwrap();
        assert!(broker.subscriptions_by_topic.is_empty());
    }

    #[test]
    fn remove_session_cascades() {
        let mut broker = Broker::new();
        broker.add_session(session(1)).unwrap();
        broker.receive_subscribe(1, Subscribe { request_id: 1, options: json!({}), topic: "news".to_string() }).unwrap();
        broker.remove_session(1);
        assert!(broker.subscriptions_by_topic.is_empty());
        assert!(broker.subscriptions_by_session.is_empty());
    }
}

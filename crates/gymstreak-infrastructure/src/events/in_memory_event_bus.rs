use async_trait::async_trait;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gymstreak_domain::events::{DomainEvent, DynamicEventHandler, EventBus};
use gymstreak_domain::shared::DomainError;

/// Dispatches events to subscribed handlers in-process, in subscription order.
/// A failing handler is logged and does not stop the others.
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<&'static str, Vec<Arc<dyn DynamicEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn subscribe(&self, handler: Arc<dyn DynamicEventHandler>) {
        let event_type_name = handler.event_type_name();
        let mut handlers = self.handlers.write().await;

        handlers.entry(event_type_name).or_default().push(handler);

        info!("Subscribed handler for event type: {}", event_type_name);
    }

    pub async fn handler_count<E: DomainEvent + 'static>(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers
            .get(std::any::type_name::<E>())
            .map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();
        let handlers = self.handlers.read().await;

        let Some(event_handlers) = handlers.get(event_type_name) else {
            debug!("No handlers registered for event type: {}", event_type_name);
            return Ok(());
        };

        for handler in event_handlers {
            if let Err(e) = handler.handle_dynamic(event.as_any()).await {
                error!("Handler failed to process event {}: {}", event_type_name, e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use gymstreak_domain::check_in::CheckInStatus;
    use gymstreak_domain::events::streak_events::{CheckInLogged, StreakRecalculated};
    use gymstreak_domain::events::{EventHandler, TypedEventHandlerWrapper};
    use gymstreak_domain::shared::{CheckInId, UserId};
    use gymstreak_domain::streak::StreakStats;

    struct CountingHandler {
        seen: Arc<RwLock<Vec<NaiveDate>>>,
    }

    #[async_trait]
    impl EventHandler<CheckInLogged> for CountingHandler {
        async fn handle(&self, event: &CheckInLogged) -> Result<(), DomainError> {
            self.seen.write().await.push(event.date);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler<CheckInLogged> for FailingHandler {
        async fn handle(&self, _event: &CheckInLogged) -> Result<(), DomainError> {
            Err(DomainError::Infrastructure("webhook down".to_string()))
        }
    }

    fn logged(date: NaiveDate) -> Box<dyn DomainEvent> {
        Box::new(CheckInLogged {
            user_id: UserId::new(),
            check_in_id: CheckInId::new(),
            date,
            status: CheckInStatus::Went,
            occurred_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_routes_by_event_type() {
        let bus = InMemoryEventBus::new();
        let seen = Arc::new(RwLock::new(Vec::new()));
        let counting = TypedEventHandlerWrapper::<CheckInLogged, _>::new(CountingHandler {
            seen: seen.clone(),
        });
        bus.subscribe(Arc::new(counting)).await;

        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        bus.publish(logged(date)).await.unwrap();
        bus.publish(Box::new(StreakRecalculated {
            user_id: UserId::new(),
            previous: StreakStats::default(),
            current: StreakStats::default(),
            occurred_at: Utc::now(),
        }))
        .await
        .unwrap();

        assert_eq!(*seen.read().await, vec![date]);
        assert_eq!(bus.handler_count::<CheckInLogged>().await, 1);
        assert_eq!(bus.handler_count::<StreakRecalculated>().await, 0);
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_block_others() {
        let bus = InMemoryEventBus::new();
        let seen = Arc::new(RwLock::new(Vec::new()));
        let failing = TypedEventHandlerWrapper::<CheckInLogged, _>::new(FailingHandler);
        bus.subscribe(Arc::new(failing)).await;
        let counting = TypedEventHandlerWrapper::<CheckInLogged, _>::new(CountingHandler {
            seen: seen.clone(),
        });
        bus.subscribe(Arc::new(counting)).await;

        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        assert!(bus.publish(logged(date)).await.is_ok());
        assert_eq!(seen.read().await.len(), 1);
    }
}

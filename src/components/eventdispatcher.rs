//! Per-actor publish/subscribe mailbox.
//!
//! Publishing only queues an event. Queued events are handed to the
//! subscribed handlers by [`deliver_events`], which the scene traversal calls
//! once per frame while updating the owning actor. Events published while
//! handlers run (including from the handlers themselves) wait for the next
//! delivery.

use std::fmt;

use bevy_ecs::prelude::{Component, Entity, World};
use rustc_hash::FxHashMap;

use crate::events::{EventType, GameEvent};

/// Callback invoked with the world, the receiving actor and the payload.
pub type EventHandler = Box<dyn FnMut(&mut World, Entity, &GameEvent) + Send + Sync>;

#[derive(Component, Default)]
pub struct EventDispatcher {
    handlers: FxHashMap<EventType, Vec<EventHandler>>,
    pending: Vec<(EventType, GameEvent)>,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("pending", &self.pending)
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Handlers of one type run in subscription order.
    pub fn subscribe(&mut self, event_type: EventType, handler: EventHandler) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Queue an event for the next delivery.
    pub fn publish(&mut self, event_type: EventType, event: GameEvent) {
        self.pending.push((event_type, event));
    }

    /// Drop every handler registered for `event_type`.
    pub fn unsubscribe_all(&mut self, event_type: &EventType) {
        self.handlers.remove(event_type);
    }

    pub fn has_handlers(&self, event_type: &EventType) -> bool {
        self.handlers
            .get(event_type)
            .is_some_and(|handlers| !handlers.is_empty())
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Events queued since the last delivery, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &(EventType, GameEvent)> {
        self.pending.iter()
    }

    fn take(&mut self) -> (Vec<(EventType, GameEvent)>, FxHashMap<EventType, Vec<EventHandler>>) {
        (
            std::mem::take(&mut self.pending),
            std::mem::take(&mut self.handlers),
        )
    }

    /// Put delivered handlers back in front of any subscribed meanwhile.
    fn restore(&mut self, mut handlers: FxHashMap<EventType, Vec<EventHandler>>) {
        for (event_type, added) in self.handlers.drain() {
            handlers.entry(event_type).or_default().extend(added);
        }
        self.handlers = handlers;
    }
}

/// Deliver the events queued on `entity` to its handlers.
///
/// Events with no subscriber are discarded. Returns the number of events
/// that were drained. Does nothing if the entity has no dispatcher.
pub fn deliver_events(world: &mut World, entity: Entity) -> usize {
    let (events, mut handlers) = match world.get_mut::<EventDispatcher>(entity) {
        Some(mut dispatcher) => {
            if dispatcher.pending.is_empty() {
                return 0;
            }
            dispatcher.take()
        }
        None => return 0,
    };

    for (event_type, event) in &events {
        if let Some(list) = handlers.get_mut(event_type) {
            for handler in list.iter_mut() {
                handler(world, entity, event);
            }
        }
    }

    match world.get_mut::<EventDispatcher>(entity) {
        Some(mut dispatcher) => dispatcher.restore(handlers),
        None => log::debug!("{entity:?} despawned while delivering its events"),
    }
    events.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::Resource;

    #[derive(Resource, Default)]
    struct Seen(Vec<String>);

    fn record(tag: &'static str) -> EventHandler {
        Box::new(move |world, _, event| {
            let label = match event {
                GameEvent::Update { delta } => format!("{tag}:update:{delta}"),
                GameEvent::Custom { name } => format!("{tag}:{name}"),
                other => format!("{tag}:{other:?}"),
            };
            world.resource_mut::<Seen>().0.push(label);
        })
    }

    fn setup() -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(Seen::default());
        let e = world.spawn(EventDispatcher::new()).id();
        (world, e)
    }

    #[test]
    fn test_publish_is_deferred_until_delivery() {
        let (mut world, e) = setup();
        world
            .get_mut::<EventDispatcher>(e)
            .unwrap()
            .subscribe(EventType::Update, record("a"));
        world
            .get_mut::<EventDispatcher>(e)
            .unwrap()
            .publish(EventType::Update, GameEvent::Update { delta: 16.0 });
        assert!(world.resource::<Seen>().0.is_empty());

        assert_eq!(deliver_events(&mut world, e), 1);
        assert_eq!(world.resource::<Seen>().0, vec!["a:update:16".to_string()]);
        assert_eq!(world.get::<EventDispatcher>(e).unwrap().pending_len(), 0);
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let (mut world, e) = setup();
        {
            let mut d = world.get_mut::<EventDispatcher>(e).unwrap();
            d.subscribe(EventType::Custom("hit".into()), record("first"));
            d.subscribe(EventType::Custom("hit".into()), record("second"));
            d.subscribe(EventType::Update, record("other"));
            d.publish(
                EventType::Custom("hit".into()),
                GameEvent::Custom { name: "hit".into() },
            );
        }
        deliver_events(&mut world, e);
        assert_eq!(
            world.resource::<Seen>().0,
            vec!["first:hit".to_string(), "second:hit".to_string()]
        );
    }

    #[test]
    fn test_publish_during_delivery_waits_a_frame() {
        let (mut world, e) = setup();
        {
            let mut d = world.get_mut::<EventDispatcher>(e).unwrap();
            d.subscribe(
                EventType::Update,
                Box::new(|world, me, _| {
                    world.resource_mut::<Seen>().0.push("update".into());
                    if let Some(mut d) = world.get_mut::<EventDispatcher>(me) {
                        d.publish(
                            EventType::Custom("echo".into()),
                            GameEvent::Custom { name: "echo".into() },
                        );
                    }
                }),
            );
            d.subscribe(EventType::Custom("echo".into()), record("h"));
            d.publish(EventType::Update, GameEvent::Update { delta: 1.0 });
        }
        deliver_events(&mut world, e);
        assert_eq!(world.resource::<Seen>().0, vec!["update".to_string()]);
        assert_eq!(world.get::<EventDispatcher>(e).unwrap().pending_len(), 1);

        deliver_events(&mut world, e);
        assert_eq!(
            world.resource::<Seen>().0,
            vec!["update".to_string(), "h:echo".to_string()]
        );
    }

    #[test]
    fn test_subscribe_during_delivery_is_kept() {
        let (mut world, e) = setup();
        {
            let mut d = world.get_mut::<EventDispatcher>(e).unwrap();
            d.subscribe(
                EventType::Update,
                Box::new(|world, me, _| {
                    if let Some(mut d) = world.get_mut::<EventDispatcher>(me) {
                        d.subscribe(EventType::Update, record("late"));
                    }
                }),
            );
            d.publish(EventType::Update, GameEvent::Update { delta: 2.0 });
        }
        deliver_events(&mut world, e);
        assert!(world.resource::<Seen>().0.is_empty());

        world
            .get_mut::<EventDispatcher>(e)
            .unwrap()
            .publish(EventType::Update, GameEvent::Update { delta: 3.0 });
        deliver_events(&mut world, e);
        assert_eq!(world.resource::<Seen>().0, vec!["late:update:3".to_string()]);
    }

    #[test]
    fn test_unsubscribed_events_are_dropped() {
        let (mut world, e) = setup();
        world
            .get_mut::<EventDispatcher>(e)
            .unwrap()
            .publish(EventType::Click, GameEvent::Click { x: 1.0, y: 1.0 });
        assert_eq!(deliver_events(&mut world, e), 1);
        assert_eq!(world.get::<EventDispatcher>(e).unwrap().pending_len(), 0);
        assert!(!world
            .get::<EventDispatcher>(e)
            .unwrap()
            .has_handlers(&EventType::Click));
    }
}

// Input subscriptions owned by the game loop
//
// Fighters and menus never listen to the keyboard themselves. The loop
// subscribes them here and releases the subscriptions when the round ends,
// so a restart starts from an empty router.

use super::action::{ui_bindings, FighterAction, InputSource, UiAction};
use super::config::{InputConfig, KeyBindings};
use log::debug;

/// Identifies one subscription for later release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug)]
enum Scope {
    Fighter {
        index: usize,
        config: InputConfig<FighterAction>,
    },
    Ui(InputConfig<UiAction>),
}

#[derive(Debug)]
struct Subscription {
    id: SubscriptionId,
    scope: Scope,
}

/// An input delivered to a subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Fighter { index: usize, action: FighterAction },
    Ui(UiAction),
}

/// Routes key events to the fighters and menus subscribed to them
#[derive(Debug, Default)]
pub struct InputRouter {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, scope: Scope) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, scope });
        id
    }

    /// Subscribe fighter `index` with its binding table. A fighter holds at
    /// most one subscription; an older one is replaced.
    pub fn subscribe_fighter(&mut self, index: usize, bindings: &KeyBindings) -> SubscriptionId {
        self.subscriptions.retain(|sub| {
            !matches!(sub.scope, Scope::Fighter { index: existing, .. } if existing == index)
        });
        let id = self.push(Scope::Fighter {
            index,
            config: bindings.to_config(),
        });
        debug!("Fighter {} subscribed to input ({:?})", index, id);
        id
    }

    /// Subscribe the menu/modal scope with the default UI bindings. Only one
    /// UI scope exists at a time.
    pub fn subscribe_ui(&mut self) -> SubscriptionId {
        self.subscriptions
            .retain(|sub| !matches!(sub.scope, Scope::Ui(_)));
        let id = self.push(Scope::Ui(InputConfig::from_bindings(ui_bindings())));
        debug!("UI subscribed to input ({:?})", id);
        id
    }

    /// Release one subscription. Returns whether it was still active.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        before != self.subscriptions.len()
    }

    /// Drop every subscription
    pub fn release_all(&mut self) {
        if !self.subscriptions.is_empty() {
            debug!("Releasing {} input subscriptions", self.subscriptions.len());
        }
        self.subscriptions.clear();
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Deliver `source` to every subscriber bound to it. Unbound keys
    /// produce nothing.
    pub fn route(&self, source: InputSource) -> Vec<Routed> {
        self.subscriptions
            .iter()
            .filter_map(|sub| match &sub.scope {
                Scope::Fighter { index, config } => config.get_action(source).map(|action| {
                    Routed::Fighter {
                        index: *index,
                        action,
                    }
                }),
                Scope::Ui(config) => config.get_action(source).map(Routed::Ui),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_routes_by_fighter() {
        let mut router = InputRouter::new();
        router.subscribe_fighter(0, &KeyBindings::PLAYER);
        router.subscribe_fighter(1, &KeyBindings::ENEMY);

        assert_eq!(
            router.route(InputSource::key(KeyCode::KeyA)),
            vec![Routed::Fighter {
                index: 0,
                action: FighterAction::MoveLeft
            }]
        );
        assert_eq!(
            router.route(InputSource::key(KeyCode::ArrowDown)),
            vec![Routed::Fighter {
                index: 1,
                action: FighterAction::Attack
            }]
        );
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut router = InputRouter::new();
        router.subscribe_fighter(0, &KeyBindings::PLAYER);
        router.subscribe_ui();
        assert!(router.route(InputSource::key(KeyCode::KeyZ)).is_empty());
    }

    #[test]
    fn test_unsubscribe_detaches() {
        let mut router = InputRouter::new();
        let id = router.subscribe_fighter(0, &KeyBindings::PLAYER);

        assert!(router.unsubscribe(id));
        assert!(!router.unsubscribe(id));
        assert_eq!(router.subscription_count(), 0);
        assert!(router.route(InputSource::key(KeyCode::Space)).is_empty());
    }

    #[test]
    fn test_resubscribing_never_duplicates() {
        let mut router = InputRouter::new();
        for _ in 0..5 {
            router.subscribe_fighter(0, &KeyBindings::PLAYER);
            router.subscribe_ui();
        }

        assert_eq!(router.subscription_count(), 2);
        assert_eq!(router.route(InputSource::key(KeyCode::Space)).len(), 1);
        assert_eq!(router.route(InputSource::key(KeyCode::Enter)).len(), 1);
    }

    #[test]
    fn test_release_all() {
        let mut router = InputRouter::new();
        router.subscribe_fighter(0, &KeyBindings::PLAYER);
        router.subscribe_fighter(1, &KeyBindings::ENEMY);
        router.subscribe_ui();
        router.release_all();

        assert_eq!(router.subscription_count(), 0);
        assert!(router.route(InputSource::key(KeyCode::Enter)).is_empty());
    }
}

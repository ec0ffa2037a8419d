use dreamroom_common::{ItemKind, Painting};
use dreamroom_kernel::{LeverStage, SafeStage, Session};
use glam::Vec3;

/// Session inspector for UI and developer tooling.
///
/// Read-only queries against a session: the inventory panel contents,
/// hover prompts and a puzzle report.
pub struct SessionInspector;

impl SessionInspector {
    /// Produce a summary of the session state.
    pub fn summary(session: &Session) -> SessionSummary {
        SessionSummary {
            session: session.id().to_string(),
            commands_applied: session.commands().len(),
            items_held: session.inventory().possessed().len(),
            equipped: session.inventory().equipped(),
            safe: session.safe_stage(),
            lever: session.lever_stage(),
            door_open: session.door_open(),
        }
    }

    /// Entries of the inventory panel, in fixed item order.
    pub fn inventory_listing(session: &Session) -> Vec<ItemEntry> {
        let inventory = session.inventory();
        inventory
            .possessed()
            .iter()
            .map(|item| ItemEntry {
                item,
                label: item_label(item),
                description: item_description(item),
                equipped: inventory.is_equipped(item),
            })
            .collect()
    }

    /// Text shown in the description area when nothing is held.
    pub const EMPTY_INVENTORY: &'static str = "(Inventory empty)";

    /// Hover text for the door, seen from `player`.
    ///
    /// Nothing is shown out of reach, once the door is open, or while the
    /// key is in hand.
    pub fn door_prompt(session: &Session, player: Vec3) -> Option<&'static str> {
        let door = &session.config().door;
        if session.door_open() || player.distance(door.position) >= door.reach {
            return None;
        }
        if session.inventory().is_equipped(ItemKind::Key) {
            None
        } else {
            Some("Locked door")
        }
    }

    /// Angle and alignment of each painting.
    pub fn painting_report(session: &Session) -> Vec<PaintingInfo> {
        let alignment = session.painting_alignment();
        Painting::ALL
            .into_iter()
            .map(|painting| PaintingInfo {
                painting,
                degrees: session.paintings().angle(painting).to_degrees(),
                aligned: alignment[painting.index()],
            })
            .collect()
    }
}

pub fn item_label(item: ItemKind) -> &'static str {
    match item {
        ItemKind::Flashlight => "Flashlight",
        ItemKind::Key => "Key",
        ItemKind::Lever => "Lever",
    }
}

pub fn item_description(item: ItemKind) -> &'static str {
    match item {
        ItemKind::Flashlight => "Flashlight: lights up dark areas.",
        ItemKind::Key => "Key: opens a locked door.",
        ItemKind::Lever => "A piece of a lever. Maybe it can be used somewhere?",
    }
}

/// Summary of session state for the inspector.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session: String,
    pub commands_applied: usize,
    pub items_held: usize,
    pub equipped: Option<ItemKind>,
    pub safe: SafeStage,
    pub lever: LeverStage,
    pub door_open: bool,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session [{}]: commands={} items={} equipped={} safe={:?} lever={} door={}",
            self.session,
            self.commands_applied,
            self.items_held,
            self.equipped.map_or("none", ItemKind::name),
            self.safe,
            self.lever,
            if self.door_open { "open" } else { "closed" },
        )
    }
}

/// One row of the inventory panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub item: ItemKind,
    pub label: &'static str,
    pub description: &'static str,
    pub equipped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintingInfo {
    pub painting: Painting,
    pub degrees: f64,
    pub aligned: bool,
}

impl std::fmt::Display for PaintingInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {:.1} deg{}",
            self.painting,
            self.degrees,
            if self.aligned { " (aligned)" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamroom_common::{Command, PickTarget};
    use dreamroom_kernel::walkthrough;

    #[test]
    fn summary_fresh_session() {
        let session = Session::new();
        let summary = SessionInspector::summary(&session);
        assert_eq!(summary.commands_applied, 0);
        assert_eq!(summary.items_held, 0);
        assert_eq!(summary.safe, SafeStage::Locked);
        let s = format!("{summary}");
        assert!(s.contains("commands=0"));
        assert!(s.contains("equipped=none"));
        assert!(s.contains("door=closed"));
    }

    #[test]
    fn listing_is_empty_then_ordered() {
        let mut session = Session::new();
        assert!(SessionInspector::inventory_listing(&session).is_empty());

        session.apply(Command::pick(PickTarget::Item(ItemKind::Flashlight)));
        session.apply(Command::FrameTick {
            light_intensity: 0.1,
        });
        session.apply(Command::pick(PickTarget::Item(ItemKind::Key)));
        session.apply(Command::Equip(ItemKind::Key));

        let listing = SessionInspector::inventory_listing(&session);
        let items: Vec<_> = listing.iter().map(|e| e.item).collect();
        assert_eq!(items, vec![ItemKind::Flashlight, ItemKind::Key]);
        assert!(!listing[0].equipped);
        assert!(listing[1].equipped);
        assert_eq!(listing[1].label, "Key");
    }

    #[test]
    fn door_prompt_depends_on_key_and_reach() {
        let mut session = Session::new();
        let near = session.config().door.position + Vec3::new(0.0, 0.0, -1.0);
        let far = session.config().door.position + Vec3::new(0.0, 0.0, -10.0);
        assert_eq!(SessionInspector::door_prompt(&session, near), Some("Locked door"));
        assert_eq!(SessionInspector::door_prompt(&session, far), None);

        session.apply(Command::FrameTick {
            light_intensity: 0.0,
        });
        session.apply(Command::pick(PickTarget::Item(ItemKind::Key)));
        session.apply(Command::Equip(ItemKind::Key));
        assert_eq!(SessionInspector::door_prompt(&session, near), None);
    }

    #[test]
    fn painting_report_after_walkthrough() {
        let config = dreamroom_kernel::GameConfig::default();
        let commands = walkthrough::solution(&config).unwrap();
        let session = Session::replay(config, &commands);
        let report = SessionInspector::painting_report(&session);
        assert_eq!(report.len(), 3);
        assert!(report.iter().all(|p| p.aligned));
        assert!((report[1].degrees - -67.5).abs() < 1e-9);
        assert!(report[0].to_string().ends_with("(aligned)"));
        assert!(session.door_open());
    }
}

//! Scripted solution of a room, used by demos and end-to-end tests.

use crate::config::GameConfig;
use crate::puzzles::is_near_any;
use dreamroom_common::{Asset, CodeSlot, Command, ItemKind, Painting, PickTarget};

/// Clicks tried per painting before giving up.
const MAX_CLICKS: u32 = 64;

/// Fewest clicks that bring a painting onto one of its targets.
pub fn clicks_to_align(step: f64, targets: &[f64], tolerance: f64) -> Option<u32> {
    let mut angle = 0.0;
    for clicks in 0..=MAX_CLICKS {
        if is_near_any(angle, targets, tolerance) {
            return Some(clicks);
        }
        angle += step;
    }
    None
}

/// Commands that solve the room from a fresh session, ending with the
/// door open. `None` if some painting cannot be aligned by clicking.
pub fn solution(config: &GameConfig) -> Option<Vec<Command>> {
    let rotation = &config.rotation;
    let mut commands = vec![
        Command::pick(PickTarget::Item(ItemKind::Flashlight)),
        Command::FrameTick {
            light_intensity: config.lighting.darkness_threshold,
        },
        Command::pick(PickTarget::Item(ItemKind::Key)),
        Command::pick(PickTarget::Safe),
    ];
    for (slot, digit) in CodeSlot::ALL.into_iter().zip(config.safe.secret) {
        commands.extend((0..digit.value()).map(|_| Command::IncrementDigit(slot)));
    }
    commands.push(Command::SubmitCode);
    if config.progression.safe_reward != ItemKind::Lever {
        // The lever still lies in the opened safe.
        commands.push(Command::pick(PickTarget::Item(ItemKind::Lever)));
    }

    commands.extend([
        Command::Equip(ItemKind::Lever),
        Command::pick(PickTarget::LeverMount),
        Command::AssetReady(Asset::MountedLever),
    ]);
    for painting in Painting::ALL {
        let clicks = clicks_to_align(
            rotation.step_radians(),
            &rotation.targets[painting.index()],
            rotation.tolerance,
        )?;
        commands.extend((0..clicks).map(|_| Command::RotatePainting(painting)));
    }
    commands.push(Command::pick(PickTarget::LeverMount));

    commands.extend([
        Command::Equip(ItemKind::Key),
        Command::Pick {
            target: PickTarget::Door,
            player: config.door.position,
        },
    ]);
    Some(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_room_click_counts() {
        let config = GameConfig::default();
        let r = &config.rotation;
        let clicks: Vec<_> = r
            .targets
            .iter()
            .map(|t| clicks_to_align(r.step_radians(), t, r.tolerance))
            .collect();
        assert_eq!(clicks, vec![Some(0), Some(3), Some(7)]);
    }

    #[test]
    fn unreachable_target_has_no_solution() {
        let mut config = GameConfig::default();
        config.rotation.targets[2] = vec![0.1];
        assert_eq!(
            clicks_to_align(config.rotation.step_radians(), &[0.1], 0.01),
            None
        );
        assert!(solution(&config).is_none());
    }

    #[test]
    fn swapped_rewards_still_solve() {
        let mut config = GameConfig::default();
        config.progression.safe_reward = ItemKind::Key;
        config.progression.rotation_reward = ItemKind::Lever;
        config.validate().unwrap();
        let commands = solution(&config).unwrap();
        assert!(commands.contains(&Command::pick(PickTarget::Item(ItemKind::Lever))));

        let session = crate::Session::replay(config, &commands);
        assert_eq!(session.lever_stage(), crate::LeverStage::Validated);
        assert!(session.door_open());
    }

    #[test]
    fn solution_enters_the_secret() {
        let config = GameConfig::default();
        let commands = solution(&config).unwrap();
        let increments = commands
            .iter()
            .filter(|c| matches!(c, Command::IncrementDigit(_)))
            .count();
        assert_eq!(increments, 3 + 2 + 1 + 6);
        assert_eq!(commands.last(), Some(&Command::Pick {
            target: PickTarget::Door,
            player: config.door.position,
        }));
    }
}

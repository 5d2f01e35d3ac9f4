//! Jump-start messages

use crate::core::random::RandomSource;

pub const JUMP_START_MESSAGES: [&str; 8] = [
    "🚫 Too eager! This isn't a drag race! 🏎️",
    "⚠️ Whoa there, Speed Racer! False start! 🏁",
    "😅 Someone's had too much energy drink! ⚡",
    "🤦‍♂️ The lights weren't even out yet! 🚦",
    "😂 Patience young grasshopper... 🦗",
    "🎮 This isn't your typical button masher! 🕹️",
    "🚨 5-second penalty for being too excited! 📝",
    "🏃‍♂️ Running before learning to walk, eh? 🚶‍♂️",
];

/// Pick one message uniformly
pub fn jump_start_message(rng: &mut impl RandomSource) -> &'static str {
    JUMP_START_MESSAGES[rng.next_index(JUMP_START_MESSAGES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{SequenceRandom, ThreadRandom};

    #[test]
    fn test_message_from_fixed_set() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            assert!(JUMP_START_MESSAGES.contains(&jump_start_message(&mut rng)));
        }
    }

    #[test]
    fn test_injected_source_picks_deterministically() {
        let mut rng = SequenceRandom::new([0.0, 0.99]);
        assert_eq!(jump_start_message(&mut rng), JUMP_START_MESSAGES[0]);
        assert_eq!(jump_start_message(&mut rng), JUMP_START_MESSAGES[7]);
    }
}

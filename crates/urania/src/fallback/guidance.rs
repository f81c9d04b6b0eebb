use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

pub const RELATIONSHIP_REPLY: &str = "Venus graces your chart with the promise of deep connections. \
Love flows to those who first love themselves. Open your heart to receive the universe's gifts, \
but remember that true love begins with self-acceptance. May your relationships bloom like lotus \
flowers in sacred waters.";

pub const CAREER_REPLY: &str = "Saturn and Jupiter align to bring career opportunities your way. \
Your professional path is guided by divine purpose. Trust your skills and take calculated risks. \
Success comes to those who combine hard work with spiritual wisdom. May prosperity flow abundantly \
in your chosen field.";

pub const GENERIC_REPLIES: [&str; 3] = [
    "The stars whisper of great potential in your path. Your question reveals a soul seeking deeper \
understanding. Trust in the cosmic timing, for everything unfolds as it should. May the divine light \
guide your journey forward.",
    "I sense strong planetary influences around you. The Moon's position suggests emotional depth and \
intuitive gifts. Focus on meditation and inner reflection during this time. The universe is preparing \
you for something beautiful.",
    "Your birth chart indicates a powerful combination of energies. Jupiter's blessing brings wisdom \
and growth opportunities. Stay open to new experiences and trust your inner guidance. Prosperity flows \
to those who align with cosmic rhythms.",
];

lazy_static::lazy_static! {
    static ref RELATIONSHIP_TOPIC: Regex = Regex::new(r"(?i)\b(love|relationship)").expect("Invalid regex");
    static ref CAREER_TOPIC: Regex = Regex::new(r"(?i)\b(career|job)").expect("Invalid regex");
}

/// Relationship questions take precedence over career questions.
pub fn synthesize_reply<R: Rng>(message: &str, rng: &mut R) -> String {
    if RELATIONSHIP_TOPIC.is_match(message) {
        return RELATIONSHIP_REPLY.to_string();
    }
    if CAREER_TOPIC.is_match(message) {
        return CAREER_REPLY.to_string();
    }
    GENERIC_REPLIES
        .choose(rng)
        .copied()
        .unwrap_or(GENERIC_REPLIES[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_topic_replies() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert_eq!(synthesize_reply("When should I change careers?", &mut rng), CAREER_REPLY);
        assert_eq!(synthesize_reply("Will I find a new JOB soon", &mut rng), CAREER_REPLY);
        assert_eq!(synthesize_reply("Is my relationship going to last?", &mut rng), RELATIONSHIP_REPLY);
        assert_eq!(synthesize_reply("love and career both", &mut rng), RELATIONSHIP_REPLY);
    }

    #[test]
    fn test_generic_reply_is_from_fixed_set() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..10 {
            let reply = synthesize_reply("What does Saturn mean for me?", &mut rng);
            assert!(GENERIC_REPLIES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_topic_words_need_a_word_start() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let reply = synthesize_reply("Tell me about glove colours", &mut rng);
        assert!(GENERIC_REPLIES.contains(&reply.as_str()));
    }
}

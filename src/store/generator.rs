//! Synthetic post text.
//!
//! The store does not care what the text looks like; [`HackerPosts`] just
//! produces something that reads like plausible techno-babble.

use super::post::Post;
use rand::RngExt;

/// A source of new posts.
pub trait PostGenerator {
    fn generate(&mut self) -> Post;
}

impl<F> PostGenerator for F
where
    F: FnMut() -> Post,
{
    fn generate(&mut self) -> Post {
        self()
    }
}

/// Random "hacker" posts: an adjective + noun title and a templated phrase
/// as the body.
#[derive(Clone, Copy, Debug, Default)]
pub struct HackerPosts;

impl PostGenerator for HackerPosts {
    fn generate(&mut self) -> Post {
        Post::new(
            format!("{} {}", pick(ADJECTIVES), pick(NOUNS)),
            phrase(),
        )
    }
}

/// One random post.
pub fn random_post() -> Post {
    HackerPosts.generate()
}

const ABBREVIATIONS: &[&str] = &[
    "ADP", "AGP", "AI", "API", "ASCII", "CLI", "COM", "CSS", "DNS", "EXE", "FTP", "GB", "HDD",
    "HEX", "HTTP", "IB", "IP", "JBOD", "JSON", "OCR", "PCI", "PNG", "RAM", "RSS", "SAS", "SCSI",
    "SDD", "SMS", "SMTP", "SQL", "SSD", "SSL", "TCP", "THX", "TLS", "UDP", "USB", "UTF8", "VGA",
    "XML", "XSS",
];

const ADJECTIVES: &[&str] = &[
    "auxiliary", "primary", "back-end", "digital", "open-source", "virtual", "cross-platform",
    "redundant", "online", "haptic", "multi-byte", "bluetooth", "wireless", "1080p", "neural",
    "optical", "solid state", "mobile",
];

const NOUNS: &[&str] = &[
    "driver", "protocol", "bandwidth", "panel", "microchip", "program", "port", "card", "array",
    "interface", "system", "sensor", "firewall", "hard drive", "pixel", "alarm", "feed", "monitor",
    "application", "transmitter", "bus", "circuit", "capacitor", "matrix",
];

const VERBS: &[&str] = &[
    "back up", "bypass", "hack", "override", "compress", "copy", "navigate", "index", "connect",
    "generate", "quantify", "calculate", "synthesize", "input", "transmit", "program", "reboot",
    "parse",
];

const ING_VERBS: &[&str] = &[
    "backing up", "bypassing", "hacking", "overriding", "compressing", "copying", "navigating",
    "indexing", "connecting", "generating", "quantifying", "calculating", "synthesizing",
    "transmitting", "programming", "parsing",
];

const PHRASES: &[&str] = &[
    "If we {verb} the {noun}, we can get to the {abbreviation} {noun} through the {adjective} {abbreviation} {noun}!",
    "We need to {verb} the {adjective} {abbreviation} {noun}!",
    "Try to {verb} the {abbreviation} {noun}, maybe it will {verb} the {adjective} {noun}!",
    "You can't {verb} the {noun} without {ingverb} the {adjective} {abbreviation} {noun}!",
    "Use the {adjective} {abbreviation} {noun}, then you can {verb} the {adjective} {noun}!",
    "The {abbreviation} {noun} is down, {verb} the {adjective} {noun} so we can {verb} the {abbreviation} {noun}!",
    "{ingverb} the {noun} won't do anything, we need to {verb} the {adjective} {abbreviation} {noun}!",
    "I'll {verb} the {adjective} {abbreviation} {noun}, that should {noun} the {abbreviation} {noun}!",
];

fn pick(words: &'static [&'static str]) -> &'static str {
    words[rand::rng().random_range(0..words.len())]
}

fn phrase() -> String {
    let template = pick(PHRASES);
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let word = match &rest[open + 1..open + len] {
            "verb" => pick(VERBS),
            "ingverb" => pick(ING_VERBS),
            "noun" => pick(NOUNS),
            "adjective" => pick(ADJECTIVES),
            _ => pick(ABBREVIATIONS),
        };
        out.push_str(word);
        rest = &rest[open + len + 1..];
    }
    out.push_str(rest);

    capitalize(out)
}

fn capitalize(s: String) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_two_words_from_the_lists() {
        for _ in 0..50 {
            let post = random_post();
            let title = post.title();
            assert!(
                ADJECTIVES
                    .iter()
                    .any(|&adj| title.starts_with(adj) && NOUNS.contains(&&title[adj.len() + 1..])),
                "unexpected title: {title}"
            );
        }
    }

    #[test]
    fn phrases_are_filled_in() {
        for _ in 0..50 {
            let body = random_post().body().to_string();
            assert!(!body.is_empty());
            assert!(!body.contains('{') && !body.contains('}'), "unfilled: {body}");
            assert!(body.ends_with('!'));
            assert!(body.chars().next().is_some_and(|c| !c.is_lowercase()));
        }
    }

    #[test]
    fn closures_are_generators() {
        let mut n = 0;
        let mut counter = || {
            n += 1;
            Post::new(format!("post {n}"), "body")
        };
        assert_eq!(counter.generate().title(), "post 1");
        assert_eq!(counter.generate().title(), "post 2");
    }
}

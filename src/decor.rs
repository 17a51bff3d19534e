//! Word lists and the flavor text wrapped around every plain-text answer.

use rand::Rng;
use rand::seq::SliceRandom;

#[rustfmt::skip]
pub const ANIMAL_EMOJIS: &[&str] = &[
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯",
    "🦁", "🐮", "🐷", "🐽", "🐸", "🐵", "🙈", "🙉", "🙊", "🐒",
    "🐔", "🐧", "🐦", "🐤", "🦆", "🦅", "🦉", "🦇", "🐺", "🐗",
    "🐴", "🦄", "🐝", "🪱", "🐛", "🦋", "🐌", "🐞", "🐜", "🪰",
    "🐢", "🐍", "🦎", "🦖", "🦕", "🐙", "🦑", "🦐", "🦞", "🦀",
    "🐡", "🐠", "🐟", "🐬", "🐳", "🐋", "🦈", "🐊", "🐅", "🐆",
    "🦓", "🦍", "🦧", "🐘", "🦛", "🦏", "🐪", "🐫", "🦒", "🦘",
    "🐃", "🐂", "🐄", "🐎", "🐖", "🐏", "🐑", "🐐", "🦌", "🐕",
    "🐩", "🦮", "🐈", "🐓", "🦃", "🦚", "🦜", "🦢", "🦗", "🕷", "🦂",
];

pub const PREAMBLES: &[&str] = &[
    "The Cloudflare soothsayers said",
    "The Cloudflare daemons said",
    "The Cloudflare admins said",
    "The Cloudflare contractors said",
    "The Cloudflare oracles announced",
    "The Cloudflare seers divined",
    "The Cloudflare augurs proclaimed",
    "The Cloudflare mystics revealed",
    "The Cloudflare prophets declared",
    "The Cloudflare wise ones pronounced",
    "The Cloudflare ancients whispered",
];

pub const SPIRIT_ANIMAL_LABELS: &[&str] = &[
    "spirit animal for this request:",
    "animal guide for this request:",
    "companion animal for this request:",
    "mystical being of this moment:",
    "animal guardian for this request:",
    "creature companion of this moment:",
];

pub const QUALIFIERS: &[&str] = &[
    "roughly",
    "most likely",
    "probably",
    "kinda",
    "sorta",
    "seemingly",
    "vaguely",
    "supposedly",
    "somewhere around",
];

/// Picks one entry uniformly at random. Empty lists yield `""`.
pub fn pick<'a, R>(rng: &mut R, words: &[&'a str]) -> &'a str
where
    R: Rng + ?Sized,
{
    words.choose(rng).copied().unwrap_or_default()
}

/// Wraps `body` in a random preamble, qualifier and spirit animal.
///
/// ```text
/// <preamble> <intro> <qualifier>:
///
/// <body>
///
/// <spirit animal label> <emoji>
/// ```
pub fn decorate<R>(rng: &mut R, intro: &str, body: &str) -> String
where
    R: Rng + ?Sized,
{
    let preamble = pick(rng, PREAMBLES);
    let qualifier = pick(rng, QUALIFIERS);
    let animal = pick(rng, ANIMAL_EMOJIS);
    let spirit_label = pick(rng, SPIRIT_ANIMAL_LABELS);

    format!("{preamble} {intro} {qualifier}:\n\n{body}\n\n{spirit_label} {animal}")
}

/// `"<preamble> <intro> <qualifier>"`, the heading used by JSON answers.
pub fn preamble<R>(rng: &mut R, intro: &str) -> String
where
    R: Rng + ?Sized,
{
    let preamble = pick(rng, PREAMBLES);
    let qualifier = pick(rng, QUALIFIERS);
    format!("{preamble} {intro} {qualifier}")
}

/// `"<label>: <emoji>"`, the spirit animal attached to JSON answers.
///
/// Every label already ends in `:`, so that colon is dropped before joining to avoid
/// `request:: 🐶`.
pub fn spirit_animal<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let label = pick(rng, SPIRIT_ANIMAL_LABELS);
    let animal = pick(rng, ANIMAL_EMOJIS);
    format!("{}: {animal}", label.trim_end_matches(':'))
}

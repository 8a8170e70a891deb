//! Paice/Husk ("Lancaster") suffix-stripping stemmer.
//!
//! An aggressive iterative stemmer: rules are indexed by the final letter of
//! the word and applied repeatedly until a rule says stop or none matches.
//! Aggressive stemming is what we want here, since two inflections of the
//! same word must collapse to the same n-gram element.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Rule table. Each rule is `ending (reversed)`, optional `*` (word must be
/// intact), number of characters to remove, optional suffix to append, and
/// `>` (continue) or `.` (stop).
const RULES: &[&str] = &[
    "ai*2.", "a*1.", "bb1.", "city3s.", "ci2>", "cn1t>", "dd1.", "dei3y>", "deec2ss.", "dee1.",
    "de2>", "dooh4>", "e1>", "feil1v.", "fi2>", "gni3>", "gai3y.", "ga2>", "gg1.", "ht*2.",
    "hsiug5ct.", "hsi3>", "i*1.", "i1y>", "ji1d.", "juf1s.", "ju1d.", "jo1d.", "jeh1r.",
    "jrev1t.", "jsim2t.", "jn1d.", "j1s.", "lbaifi6.", "lbai4y.", "lba3>", "lbi3.", "lib2l>",
    "lc1.", "lufi4y.", "luf3>", "lu2.", "lai3>", "lau3>", "la2>", "ll1.", "mui3.", "mu*2.",
    "msi3>", "mm1.", "nois4j>", "noix4ct.", "noi3>", "nai3>", "na2>", "nee0.", "ne2>", "nn1.",
    "pihs4>", "pp1.", "re2>", "rae0.", "ra2.", "ro2>", "ru2>", "rr1.", "rt1>", "rei3y>",
    "sei3y>", "sis2.", "si2>", "ssen4>", "ss0.", "suo3>", "su*2.", "s*1>", "s0.", "tacilp4y.",
    "ta2>", "tnem4>", "tne3>", "tna3>", "tpir2b.", "tpro2b.", "tcud1.", "tpmus2.", "tpec2iv.",
    "tulo2v.", "tsis0.", "tsi3>", "tt1.", "uqi3.", "ugo1.", "vis3j>", "vie0.", "vi2>", "ylb1>",
    "yli3y>", "ylp0.", "yl2>", "ygo1.", "yhp1.", "ymo1.", "ypo1.", "yti3>", "yte3>", "ytl2.",
    "yrtsi5.", "yra3>", "yro3>", "yfi3.", "ycn2t>", "yca3>", "zi2>", "zy1s.",
];

#[derive(Debug, Clone)]
struct Rule {
    /// Ending in normal (not reversed) order.
    ending: Vec<char>,
    intact: bool,
    remove: usize,
    append: String,
    stop: bool,
}

impl Rule {
    fn parse(raw: &str) -> Option<Rule> {
        let chars: Vec<char> = raw.chars().collect();
        let mut i = 0;
        while i < chars.len() && chars[i].is_ascii_lowercase() {
            i += 1;
        }
        if i == 0 {
            return None;
        }
        let mut ending: Vec<char> = chars[..i].to_vec();
        ending.reverse();

        let intact = chars.get(i) == Some(&'*');
        if intact {
            i += 1;
        }

        let remove = chars.get(i)?.to_digit(10)? as usize;
        i += 1;

        let mut append = String::new();
        while i < chars.len() && chars[i].is_ascii_lowercase() {
            append.push(chars[i]);
            i += 1;
        }

        let stop = match chars.get(i) {
            Some('.') => true,
            Some('>') | None => false,
            Some(_) => return None,
        };

        Some(Rule {
            ending,
            intact,
            remove,
            append,
            stop,
        })
    }
}

/// Rules grouped by the last letter of their ending, table order preserved.
static RULE_INDEX: Lazy<HashMap<char, Vec<Rule>>> = Lazy::new(|| {
    let mut index: HashMap<char, Vec<Rule>> = HashMap::new();
    for raw in RULES {
        if let Some(rule) = Rule::parse(raw) {
            if let Some(&last) = rule.ending.last() {
                index.entry(last).or_default().push(rule);
            }
        }
    }
    index
});

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Position of the last letter of the word's leading alphabetic run.
fn last_letter(word: &[char]) -> Option<usize> {
    word.iter().take_while(|c| c.is_alphabetic()).count().checked_sub(1)
}

/// Whether removing `remove` characters leaves an acceptable stem.
fn is_acceptable(word: &[char], remove: usize) -> bool {
    let Some(remaining) = word.len().checked_sub(remove) else {
        return false;
    };
    match word.first() {
        Some(&c) if is_vowel(c) => remaining >= 2,
        Some(_) => remaining >= 3 && (is_vowel(word[1]) || is_vowel(word[2])),
        None => false,
    }
}

/// Stem a single word. The input is lowercased first.
pub fn stem(word: &str) -> String {
    let lowered = word.to_lowercase();
    let intact: Vec<char> = lowered.chars().collect();
    let mut current = intact.clone();

    loop {
        let Some(pos) = last_letter(&current) else {
            break;
        };
        let Some(rules) = RULE_INDEX.get(&current[pos]) else {
            break;
        };

        let mut applied = None;
        for rule in rules {
            if !current.ends_with(&rule.ending) {
                continue;
            }
            if rule.intact && current != intact {
                continue;
            }
            if !is_acceptable(&current, rule.remove) {
                continue;
            }
            applied = Some(rule);
            break;
        }

        match applied {
            Some(rule) => {
                current.truncate(current.len() - rule.remove);
                current.extend(rule.append.chars());
                if rule.stop {
                    break;
                }
            }
            None => break,
        }
    }

    current.into_iter().collect()
}

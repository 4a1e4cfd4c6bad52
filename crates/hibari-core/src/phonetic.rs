//! Phonetic transliteration of chord patterns. Each half of a pattern spells
//! at most one mora: an onset cluster from the consonant keys (S T K N Y), a
//! vowel cluster from the vowel keys (I A U), and the small suffix keys
//! (n t k) for the closing kana. The halves are rendered to hiragana and the
//! hiragana to IME-ready romaji; the kana count is what undo must erase.

use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliterated {
    pub romaji: String,
    /// Number of hiragana the romaji composes to.
    pub kana_len: u8,
}

/// Convert a canonical chord pattern. `None` means the chord has no phonetic
/// reading and the caller must fall back to passthrough.
pub fn transliterate(pattern: &str) -> Option<Transliterated> {
    let (left, right) = pattern.split_once('-')?;
    let mut kana = String::new();
    if !left.is_empty() {
        kana.push_str(&half_to_kana(left)?);
    }
    if !right.is_empty() {
        kana.push_str(&half_to_kana(right)?);
    }
    if kana.is_empty() {
        return None;
    }

    let mut romaji = String::new();
    let mut kana_len = 0u8;
    for c in kana.chars() {
        romaji.push_str(kana_to_romaji(c)?);
        kana_len += 1;
    }
    Some(Transliterated { romaji, kana_len })
}

fn half_to_kana(half: &str) -> Option<String> {
    let (mut s, mut t, mut k, mut n, mut y) = (false, false, false, false, false);
    let (mut vi, mut va, mut vu) = (false, false, false);
    let (mut suf_n, mut suf_t, mut suf_k) = (false, false, false);

    for c in half.chars() {
        match c {
            'S' => s = true,
            'T' => t = true,
            'K' => k = true,
            'N' => n = true,
            'Y' => y = true,
            'I' => vi = true,
            'A' => va = true,
            'U' => vu = true,
            'n' => suf_n = true,
            't' => suf_t = true,
            'k' => suf_k = true,
            // The number-bar and star markers are command territory.
            _ => return None,
        }
    }

    let onset = onset_cluster(s, t, k, n, y)?;
    let vowel = match (vi, va, vu) {
        (false, false, false) => None,
        (true, false, false) => Some('i'),
        (false, true, false) => Some('a'),
        (false, false, true) => Some('u'),
        (true, true, false) => Some('e'),
        (false, true, true) => Some('o'),
        _ => return None,
    };

    let mut out = String::new();
    match vowel {
        Some(v) => out.push(syllable(onset, v)?),
        // A consonant with no vowel is unreadable; bare suffixes are fine.
        None if !onset.is_empty() => return None,
        None => {}
    }
    if suf_n {
        out.push('ん');
    }
    if suf_t {
        out.push('っ');
    }
    if suf_k {
        out.push('く');
    }
    if out.is_empty() {
        return None;
    }
    Some(out)
}

/// Consonant-key clusters: five plain rows on single keys, voiced rows and
/// the rest of the gojūon on fixed two-key clusters.
fn onset_cluster(s: bool, t: bool, k: bool, n: bool, y: bool) -> Option<&'static str> {
    Some(match (s, t, k, n, y) {
        (false, false, false, false, false) => "",
        (true, false, false, false, false) => "s",
        (false, true, false, false, false) => "t",
        (false, false, true, false, false) => "k",
        (false, false, false, true, false) => "n",
        (false, false, false, false, true) => "y",
        (true, true, false, false, false) => "z",
        (true, false, true, false, false) => "g",
        (false, true, true, false, false) => "d",
        (false, false, false, true, true) => "h",
        (false, false, true, true, false) => "m",
        (true, false, false, true, false) => "r",
        (false, true, false, true, false) => "w",
        (false, false, true, false, true) => "b",
        (true, false, false, false, true) => "p",
        _ => return None,
    })
}

fn syllable(onset: &str, vowel: char) -> Option<char> {
    let c = match (onset, vowel) {
        ("", 'a') => 'あ',
        ("", 'i') => 'い',
        ("", 'u') => 'う',
        ("", 'e') => 'え',
        ("", 'o') => 'お',
        ("k", 'a') => 'か',
        ("k", 'i') => 'き',
        ("k", 'u') => 'く',
        ("k", 'e') => 'け',
        ("k", 'o') => 'こ',
        ("s", 'a') => 'さ',
        ("s", 'i') => 'し',
        ("s", 'u') => 'す',
        ("s", 'e') => 'せ',
        ("s", 'o') => 'そ',
        ("t", 'a') => 'た',
        ("t", 'i') => 'ち',
        ("t", 'u') => 'つ',
        ("t", 'e') => 'て',
        ("t", 'o') => 'と',
        ("n", 'a') => 'な',
        ("n", 'i') => 'に',
        ("n", 'u') => 'ぬ',
        ("n", 'e') => 'ね',
        ("n", 'o') => 'の',
        ("h", 'a') => 'は',
        ("h", 'i') => 'ひ',
        ("h", 'u') => 'ふ',
        ("h", 'e') => 'へ',
        ("h", 'o') => 'ほ',
        ("m", 'a') => 'ま',
        ("m", 'i') => 'み',
        ("m", 'u') => 'む',
        ("m", 'e') => 'め',
        ("m", 'o') => 'も',
        ("y", 'a') => 'や',
        ("y", 'u') => 'ゆ',
        ("y", 'o') => 'よ',
        ("r", 'a') => 'ら',
        ("r", 'i') => 'り',
        ("r", 'u') => 'る',
        ("r", 'e') => 'れ',
        ("r", 'o') => 'ろ',
        ("w", 'a') => 'わ',
        ("w", 'o') => 'を',
        ("g", 'a') => 'が',
        ("g", 'i') => 'ぎ',
        ("g", 'u') => 'ぐ',
        ("g", 'e') => 'げ',
        ("g", 'o') => 'ご',
        ("z", 'a') => 'ざ',
        ("z", 'i') => 'じ',
        ("z", 'u') => 'ず',
        ("z", 'e') => 'ぜ',
        ("z", 'o') => 'ぞ',
        ("d", 'a') => 'だ',
        ("d", 'i') => 'ぢ',
        ("d", 'u') => 'づ',
        ("d", 'e') => 'で',
        ("d", 'o') => 'ど',
        ("b", 'a') => 'ば',
        ("b", 'i') => 'び',
        ("b", 'u') => 'ぶ',
        ("b", 'e') => 'べ',
        ("b", 'o') => 'ぼ',
        ("p", 'a') => 'ぱ',
        ("p", 'i') => 'ぴ',
        ("p", 'u') => 'ぷ',
        ("p", 'e') => 'ぺ',
        ("p", 'o') => 'ぽ',
        _ => return None,
    };
    Some(c)
}

lazy_static! {
    static ref KANA_ROMAJI_MAP: HashMap<char, &'static str> = {
        let mut m = HashMap::new();
        m.insert('あ', "a"); m.insert('い', "i"); m.insert('う', "u"); m.insert('え', "e"); m.insert('お', "o");
        m.insert('か', "ka"); m.insert('き', "ki"); m.insert('く', "ku"); m.insert('け', "ke"); m.insert('こ', "ko");
        m.insert('さ', "sa"); m.insert('し', "shi"); m.insert('す', "su"); m.insert('せ', "se"); m.insert('そ', "so");
        m.insert('た', "ta"); m.insert('ち', "chi"); m.insert('つ', "tsu"); m.insert('て', "te"); m.insert('と', "to");
        m.insert('な', "na"); m.insert('に', "ni"); m.insert('ぬ', "nu"); m.insert('ね', "ne"); m.insert('の', "no");
        m.insert('は', "ha"); m.insert('ひ', "hi"); m.insert('ふ', "hu"); m.insert('へ', "he"); m.insert('ほ', "ho");
        m.insert('ま', "ma"); m.insert('み', "mi"); m.insert('む', "mu"); m.insert('め', "me"); m.insert('も', "mo");
        m.insert('や', "ya"); m.insert('ゆ', "yu"); m.insert('よ', "yo");
        m.insert('ら', "ra"); m.insert('り', "ri"); m.insert('る', "ru"); m.insert('れ', "re"); m.insert('ろ', "ro");
        m.insert('わ', "wa"); m.insert('を', "wo"); m.insert('ん', "nn");

        m.insert('が', "ga"); m.insert('ぎ', "gi"); m.insert('ぐ', "gu"); m.insert('げ', "ge"); m.insert('ご', "go");
        m.insert('ざ', "za"); m.insert('じ', "ji"); m.insert('ず', "zu"); m.insert('ぜ', "ze"); m.insert('ぞ', "zo");
        m.insert('だ', "da"); m.insert('ぢ', "di"); m.insert('づ', "du"); m.insert('で', "de"); m.insert('ど', "do");
        m.insert('ば', "ba"); m.insert('び', "bi"); m.insert('ぶ', "bu"); m.insert('べ', "be"); m.insert('ぼ', "bo");

        m.insert('ぱ', "pa"); m.insert('ぴ', "pi"); m.insert('ぷ', "pu"); m.insert('ぺ', "pe"); m.insert('ぽ', "po");

        m.insert('っ', "ltu");

        m
    };
}

pub fn kana_to_romaji(c: char) -> Option<&'static str> {
    KANA_ROMAJI_MAP.get(&c).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_mora_word() {
        let r = transliterate("KA-TU").unwrap();
        assert_eq!(r.romaji, "katsu");
        assert_eq!(r.kana_len, 2);
    }

    #[test]
    fn test_single_mora_hepburn_irregular() {
        let r = transliterate("TI-").unwrap();
        assert_eq!(r.romaji, "chi");
        assert_eq!(r.kana_len, 1);
    }

    #[test]
    fn test_voiced_cluster() {
        // S+K together select the voiced k row.
        let r = transliterate("SKA-").unwrap();
        assert_eq!(r.romaji, "ga");
    }

    #[test]
    fn test_closing_nasal_suffix() {
        let r = transliterate("KAn-TA").unwrap();
        assert_eq!(r.romaji, "kannta");
        assert_eq!(r.kana_len, 3);
    }

    #[test]
    fn test_geminate_suffix() {
        let r = transliterate("KAt-TA").unwrap();
        assert_eq!(r.romaji, "kaltuta");
        assert_eq!(r.kana_len, 3);
    }

    #[test]
    fn test_unreadable_clusters_fail() {
        // Three-consonant cluster.
        assert_eq!(transliterate("STY-"), None);
        // Vowel pair i+u has no reading.
        assert_eq!(transliterate("KIU-"), None);
        // Consonant with no vowel.
        assert_eq!(transliterate("S-"), None);
        // Command markers never transliterate.
        assert_eq!(transliterate("#-"), None);
    }

    #[test]
    fn test_vowel_only_and_suffix_only() {
        assert_eq!(transliterate("A-").unwrap().romaji, "a");
        assert_eq!(transliterate("n-").unwrap().romaji, "nn");
    }
}

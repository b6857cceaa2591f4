//! QWERTY adjacency
//!
//! Typo simulation picks a physically adjacent key, not a random character.

use phf::phf_map;
use rand::rngs::StdRng;
use rand::Rng;

/// Neighboring keys on a QWERTY layout, lowercase
static QWERTY_NEIGHBORS: phf::Map<char, &'static [char]> = phf_map! {
    'q' => &['w', 'a'],
    'w' => &['q', 'e', 's'],
    'e' => &['w', 'r', 'd'],
    'r' => &['e', 't', 'f'],
    't' => &['r', 'y', 'g'],
    'y' => &['t', 'u', 'h'],
    'u' => &['y', 'i', 'j'],
    'i' => &['u', 'o', 'k'],
    'o' => &['i', 'p', 'l'],
    'p' => &['o', 'l'],
    'a' => &['q', 's', 'z'],
    's' => &['a', 'w', 'd', 'x'],
    'd' => &['s', 'e', 'f', 'c'],
    'f' => &['d', 'r', 'g', 'v'],
    'g' => &['f', 't', 'h', 'b'],
    'h' => &['g', 'y', 'j', 'n'],
    'j' => &['h', 'u', 'k', 'm'],
    'k' => &['j', 'i', 'l'],
    'l' => &['k', 'o', 'p'],
    'z' => &['a', 's', 'x'],
    'x' => &['z', 'd', 'c'],
    'c' => &['x', 'f', 'v'],
    'v' => &['c', 'g', 'b'],
    'b' => &['v', 'h', 'n'],
    'n' => &['b', 'j', 'm'],
    'm' => &['n', 'j'],
};

/// Pick a key adjacent to `c`, preserving case.
///
/// Characters without a neighbor entry (digits, punctuation) pass through
/// unchanged.
pub fn nearby_key(c: char, rng: &mut StdRng) -> char {
    let lower = c.to_ascii_lowercase();
    match QWERTY_NEIGHBORS.get(&lower) {
        Some(neighbors) => {
            let pick = neighbors[rng.gen_range(0..neighbors.len())];
            if c.is_ascii_uppercase() {
                pick.to_ascii_uppercase()
            } else {
                pick
            }
        }
        None => c,
    }
}

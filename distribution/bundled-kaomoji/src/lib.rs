//! Kaomoji shipped with the application.
//!
//! Order matters: the catalog is built in table order and an empty query
//! lists entries exactly as they appear here.

pub struct BundledKaomoji {
    pub glyph: &'static str,
    pub tags: &'static [&'static str],
    pub category: &'static str,
}

pub const BUNDLED_KAOMOJI: &[BundledKaomoji] = &[
    // --- Joy ---
    BundledKaomoji { glyph: "(◕‿◕)", tags: &["happy", "smile", "cute"], category: "Joy" },
    BundledKaomoji { glyph: "(＾▽＾)", tags: &["happy", "grin"], category: "Joy" },
    BundledKaomoji { glyph: "ヽ(・∀・)ﾉ", tags: &["happy", "cheer", "excited"], category: "Joy" },
    BundledKaomoji { glyph: "(✿◠‿◠)", tags: &["happy", "flower", "blush"], category: "Joy" },
    BundledKaomoji { glyph: "＼(^o^)／", tags: &["happy", "hooray", "celebrate"], category: "Joy" },
    BundledKaomoji { glyph: "(*^ω^*)", tags: &["happy", "blush", "content"], category: "Joy" },
    BundledKaomoji { glyph: "٩(◕‿◕｡)۶", tags: &["happy", "dance", "excited"], category: "Joy" },
    BundledKaomoji { glyph: "(ﾉ◕ヮ◕)ﾉ*:･ﾟ✧", tags: &["happy", "sparkle", "magic"], category: "Joy" },
    // --- Love ---
    BundledKaomoji { glyph: "(♡°▽°♡)", tags: &["love", "heart", "adore"], category: "Love" },
    BundledKaomoji { glyph: "(´ε｀ )♡", tags: &["love", "kiss"], category: "Love" },
    BundledKaomoji { glyph: "(っ˘з(˘⌣˘ )", tags: &["love", "kiss", "couple"], category: "Love" },
    BundledKaomoji { glyph: "♡( ◡‿◡ )", tags: &["love", "heart", "blush"], category: "Love" },
    // --- Embarrassment ---
    BundledKaomoji { glyph: "(⁄ ⁄>⁄ ▽ ⁄<⁄ ⁄)", tags: &["embarrassed", "blush", "shy"], category: "Embarrassment" },
    BundledKaomoji { glyph: "(*/ω＼)", tags: &["embarrassed", "hide", "shy"], category: "Embarrassment" },
    BundledKaomoji { glyph: "(シ_ _)シ", tags: &["embarrassed", "bow", "sorry"], category: "Embarrassment" },
    // --- Sympathy ---
    BundledKaomoji { glyph: "(ノ_<。)ヾ(´ ▽ ` )", tags: &["sympathy", "comfort", "pat"], category: "Sympathy" },
    BundledKaomoji { glyph: "(っ´ω`)ﾉ(╥ω╥)", tags: &["sympathy", "comfort", "cry"], category: "Sympathy" },
    // --- Dissatisfaction ---
    BundledKaomoji { glyph: "(￣ヘ￣)", tags: &["annoyed", "pout", "grumpy"], category: "Dissatisfaction" },
    BundledKaomoji { glyph: "(＃＞＜)", tags: &["annoyed", "frustrated"], category: "Dissatisfaction" },
    BundledKaomoji { glyph: "(；￣Д￣)", tags: &["annoyed", "disgust"], category: "Dissatisfaction" },
    // --- Anger ---
    BundledKaomoji { glyph: "(╯°□°）╯︵ ┻━┻", tags: &["angry", "tableflip", "rage"], category: "Anger" },
    BundledKaomoji { glyph: "ヽ(`⌒´メ)ノ", tags: &["angry", "mad"], category: "Anger" },
    BundledKaomoji { glyph: "(҂ `з´ )", tags: &["angry", "grumble"], category: "Anger" },
    BundledKaomoji { glyph: "┬─┬ノ( º _ ºノ)", tags: &["calm", "table", "unflip"], category: "Anger" },
    // --- Sadness ---
    BundledKaomoji { glyph: "(T_T)", tags: &["sad", "cry", "tears"], category: "Sadness" },
    BundledKaomoji { glyph: "(╥﹏╥)", tags: &["sad", "cry", "sob"], category: "Sadness" },
    BundledKaomoji { glyph: "(ಥ﹏ಥ)", tags: &["sad", "cry", "tears"], category: "Sadness" },
    BundledKaomoji { glyph: "( ╥ω╥ )", tags: &["sad", "pout"], category: "Sadness" },
    BundledKaomoji { glyph: "(︶︹︶)", tags: &["sad", "disappointed"], category: "Sadness" },
    // --- Fear ---
    BundledKaomoji { glyph: "(ﾉωﾋ)", tags: &["scared", "hide", "fear"], category: "Fear" },
    BundledKaomoji { glyph: "ヽ(ﾟДﾟ)ﾉ", tags: &["scared", "panic", "shock"], category: "Fear" },
    // --- Indifference ---
    BundledKaomoji { glyph: "¯\\_(ツ)_/¯", tags: &["shrug", "whatever", "dunno"], category: "Indifference" },
    BundledKaomoji { glyph: "(￣～￣;)", tags: &["shrug", "meh"], category: "Indifference" },
    BundledKaomoji { glyph: "ಠ_ಠ", tags: &["disapproval", "stare", "look"], category: "Indifference" },
    // --- Confusion ---
    BundledKaomoji { glyph: "(・_・ヾ", tags: &["confused", "scratch"], category: "Confusion" },
    BundledKaomoji { glyph: "(⊙_◎)", tags: &["confused", "dizzy"], category: "Confusion" },
    BundledKaomoji { glyph: "(￣■￣;)!?", tags: &["confused", "surprised"], category: "Confusion" },
    // --- Surprise ---
    BundledKaomoji { glyph: "(⊙_⊙)", tags: &["surprised", "shock", "stare"], category: "Surprise" },
    BundledKaomoji { glyph: "Σ(°ロ°)", tags: &["surprised", "shock", "gasp"], category: "Surprise" },
    BundledKaomoji { glyph: "(°ロ°) !", tags: &["surprised", "gasp"], category: "Surprise" },
    // --- Greeting ---
    BundledKaomoji { glyph: "(^_^)/", tags: &["wave", "hello", "hi"], category: "Greeting" },
    BundledKaomoji { glyph: "(￣▽￣)ノ", tags: &["wave", "hello", "bye"], category: "Greeting" },
    BundledKaomoji { glyph: "(*・ω・)ﾉ", tags: &["wave", "hi"], category: "Greeting" },
    // --- Hugging ---
    BundledKaomoji { glyph: "(っ´▽｀)っ", tags: &["hug", "cuddle"], category: "Hugging" },
    BundledKaomoji { glyph: "⊂(・▽・⊂)", tags: &["hug", "reach"], category: "Hugging" },
    BundledKaomoji { glyph: "(づ｡◕‿‿◕｡)づ", tags: &["hug", "cute", "love"], category: "Hugging" },
    // --- Winking ---
    BundledKaomoji { glyph: "(^_~)", tags: &["wink"], category: "Winking" },
    BundledKaomoji { glyph: "(>ω^)", tags: &["wink", "playful"], category: "Winking" },
    // --- Sleeping ---
    BundledKaomoji { glyph: "(－_－) zzZ", tags: &["sleep", "tired", "zzz"], category: "Sleeping" },
    BundledKaomoji { glyph: "(∪｡∪)｡｡｡zzZ", tags: &["sleep", "nap", "zzz"], category: "Sleeping" },
    // --- Animals ---
    BundledKaomoji { glyph: "(=^･ω･^=)", tags: &["cat", "neko", "cute"], category: "Cat" },
    BundledKaomoji { glyph: "(=①ω①=)", tags: &["cat", "stare"], category: "Cat" },
    BundledKaomoji { glyph: "ʕ•ᴥ•ʔ", tags: &["bear", "cute"], category: "Bear" },
    BundledKaomoji { glyph: "ʕ ᵔᴥᵔ ʔ", tags: &["bear", "happy"], category: "Bear" },
    BundledKaomoji { glyph: "∪･ω･∪", tags: &["dog", "puppy"], category: "Dog" },
    BundledKaomoji { glyph: "／(≧ x ≦)＼", tags: &["rabbit", "bunny"], category: "Rabbit" },
    // --- Friends & objects ---
    BundledKaomoji { glyph: "ヾ(・ω・)メ(・ω・)ノ", tags: &["friends", "together"], category: "Friends" },
    BundledKaomoji { glyph: "( ・_・)ノ―⊂ZZZ⊃", tags: &["weapon", "bat"], category: "Weapons" },
    BundledKaomoji { glyph: "(ノ>ω<)ノ :｡･:*:･ﾟ’★,｡･:*:･ﾟ’☆", tags: &["magic", "sparkle", "spell"], category: "Magic" },
    BundledKaomoji { glyph: "( ˘▽˘)っ♨", tags: &["food", "tea", "hot"], category: "Food" },
    BundledKaomoji { glyph: "ヾ(⌐■_■)ノ♪", tags: &["music", "cool", "dance"], category: "Music" },
    // --- Art ---
    BundledKaomoji {
        glyph: "　∧＿∧\n（｡･ω･｡)つ━☆・*。\n⊂　　 ノ 　　　・゜+.\n　しーＪ　　　°。+ *´¨)",
        tags: &["magic", "wand", "art"],
        category: "Special",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_glyphs_are_unique() {
        let mut seen = HashSet::new();
        for item in BUNDLED_KAOMOJI {
            assert!(seen.insert(item.glyph), "duplicate bundled glyph: {}", item.glyph);
        }
    }

    #[test]
    fn test_bundled_tags_are_lowercase() {
        for item in BUNDLED_KAOMOJI {
            assert!(!item.glyph.trim().is_empty());
            for tag in item.tags {
                assert_eq!(*tag, tag.to_lowercase(), "tag not normalized on {}", item.glyph);
            }
        }
    }
}

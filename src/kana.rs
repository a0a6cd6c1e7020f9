/*
 * src/kana.rs
 * ひらがなデータを管理するモジュール
 */

/// 1文字分の発音データ
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CharacterRecord {
    pub symbol: &'static str,    // "あ" や "が"
    pub romanized: &'static str, // ローマ字 (小文字)
    pub localized: &'static str, // ハングル表記
}

impl CharacterRecord {
    pub const fn new(symbol: &'static str, romanized: &'static str, localized: &'static str) -> Self {
        Self {
            symbol,
            romanized,
            localized,
        }
    }
}

/// 文字セットの区分 (互いに素)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subset {
    /// 清音 (あ〜ん)
    Basic,
    /// 濁音 (が、ざ、だ、ば行)
    Dakuten,
    /// 半濁音 (ぱ行)
    Handakuten,
}

impl Subset {
    pub const ALL: [Subset; 3] = [Subset::Basic, Subset::Dakuten, Subset::Handakuten];

    /// この区分に属する静的データ
    pub fn records(self) -> &'static [CharacterRecord] {
        match self {
            Subset::Basic => BASIC,
            Subset::Dakuten => DAKUTEN,
            Subset::Handakuten => HANDAKUTEN,
        }
    }
}

const fn r(symbol: &'static str, romanized: &'static str, localized: &'static str) -> CharacterRecord {
    CharacterRecord::new(symbol, romanized, localized)
}

/// 清音 46文字 (五十音順)
pub const BASIC: &[CharacterRecord] = &[
    // あ行
    r("あ", "a", "아"),
    r("い", "i", "이"),
    r("う", "u", "우"),
    r("え", "e", "에"),
    r("お", "o", "오"),
    // か行
    r("か", "ka", "카"),
    r("き", "ki", "키"),
    r("く", "ku", "쿠"),
    r("け", "ke", "케"),
    r("こ", "ko", "코"),
    // さ行
    r("さ", "sa", "사"),
    r("し", "shi", "시"),
    r("す", "su", "스"),
    r("せ", "se", "세"),
    r("そ", "so", "소"),
    // た行
    r("た", "ta", "타"),
    r("ち", "chi", "치"),
    r("つ", "tsu", "츠"),
    r("て", "te", "테"),
    r("と", "to", "토"),
    // な行
    r("な", "na", "나"),
    r("に", "ni", "니"),
    r("ぬ", "nu", "누"),
    r("ね", "ne", "네"),
    r("の", "no", "노"),
    // は行
    r("は", "ha", "하"),
    r("ひ", "hi", "히"),
    r("ふ", "fu", "후"),
    r("へ", "he", "헤"),
    r("ほ", "ho", "호"),
    // ま行
    r("ま", "ma", "마"),
    r("み", "mi", "미"),
    r("む", "mu", "무"),
    r("め", "me", "메"),
    r("も", "mo", "모"),
    // や行
    r("や", "ya", "야"),
    r("ゆ", "yu", "유"),
    r("よ", "yo", "요"),
    // ら行
    r("ら", "ra", "라"),
    r("り", "ri", "리"),
    r("る", "ru", "루"),
    r("れ", "re", "레"),
    r("ろ", "ro", "로"),
    // わ行
    r("わ", "wa", "와"),
    r("を", "wo", "오"),
    r("ん", "n", "응"),
];

/// 濁音 20文字
pub const DAKUTEN: &[CharacterRecord] = &[
    r("が", "ga", "가"),
    r("ぎ", "gi", "기"),
    r("ぐ", "gu", "구"),
    r("げ", "ge", "게"),
    r("ご", "go", "고"),
    r("ざ", "za", "자"),
    r("じ", "ji", "지"),
    r("ず", "zu", "즈"),
    r("ぜ", "ze", "제"),
    r("ぞ", "zo", "조"),
    r("だ", "da", "다"),
    r("ぢ", "ji", "지"),
    r("づ", "zu", "즈"),
    r("で", "de", "데"),
    r("ど", "do", "도"),
    r("ば", "ba", "바"),
    r("び", "bi", "비"),
    r("ぶ", "bu", "부"),
    r("べ", "be", "베"),
    r("ぼ", "bo", "보"),
];

/// 半濁音 5文字
pub const HANDAKUTEN: &[CharacterRecord] = &[
    r("ぱ", "pa", "파"),
    r("ぴ", "pi", "피"),
    r("ぷ", "pu", "푸"),
    r("ぺ", "pe", "페"),
    r("ぽ", "po", "포"),
];

/// ヒント表の並び (5列、空欄は None)
pub const HINT_ROWS: &[(Subset, [Option<&str>; 5])] = &[
    (Subset::Basic, [Some("あ"), Some("い"), Some("う"), Some("え"), Some("お")]),
    (Subset::Basic, [Some("か"), Some("き"), Some("く"), Some("け"), Some("こ")]),
    (Subset::Basic, [Some("さ"), Some("し"), Some("す"), Some("せ"), Some("そ")]),
    (Subset::Basic, [Some("た"), Some("ち"), Some("つ"), Some("て"), Some("と")]),
    (Subset::Basic, [Some("な"), Some("に"), Some("ぬ"), Some("ね"), Some("の")]),
    (Subset::Basic, [Some("は"), Some("ひ"), Some("ふ"), Some("へ"), Some("ほ")]),
    (Subset::Basic, [Some("ま"), Some("み"), Some("む"), Some("め"), Some("も")]),
    (Subset::Basic, [Some("や"), None, Some("ゆ"), None, Some("よ")]),
    (Subset::Basic, [Some("ら"), Some("り"), Some("る"), Some("れ"), Some("ろ")]),
    (Subset::Basic, [Some("わ"), None, None, None, Some("を")]),
    (Subset::Basic, [Some("ん"), None, None, None, None]),
    (Subset::Dakuten, [Some("が"), Some("ぎ"), Some("ぐ"), Some("げ"), Some("ご")]),
    (Subset::Dakuten, [Some("ざ"), Some("じ"), Some("ず"), Some("ぜ"), Some("ぞ")]),
    (Subset::Dakuten, [Some("だ"), Some("ぢ"), Some("づ"), Some("で"), Some("ど")]),
    (Subset::Dakuten, [Some("ば"), Some("び"), Some("ぶ"), Some("べ"), Some("ぼ")]),
    (Subset::Handakuten, [Some("ぱ"), Some("ぴ"), Some("ぷ"), Some("ぺ"), Some("ぽ")]),
];

/// Coarse power tier of a word, derived from its base stat total (BST).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// BST < 300
    F,
    /// 300 <= BST < 350
    D,
    /// 350 <= BST < 400
    C,
    /// 400 <= BST < 450
    B,
    /// 450 <= BST < 500
    A,
    /// 500 <= BST
    S,
}

impl Rank {
    pub const fn from_total(bst: u32) -> Self {
        match bst {
            0..300 => Rank::F,
            300..350 => Rank::D,
            350..400 => Rank::C,
            400..450 => Rank::B,
            450..500 => Rank::A,
            _ => Rank::S,
        }
    }
}

/// Possible normalization steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a + (b + c) = a + b + c`
    /// `a * (b * c) = a * b * c`
    Flatten,

    /// `1 + x + 2 = 3 + x`
    /// `2 * x * 3 = 6 * x`
    FoldConstants,

    /// `0 + a = a`
    /// `a + 0 = a`
    AddZero,

    /// `0 * a = 0`
    /// `a * 0 = 0`
    MultiplyZero,

    /// `1 * a = a`
    /// `a * 1 = a`
    MultiplyOne,

    /// A sum or product with one child is that child. An empty sum is `0`, and an empty product
    /// is `1`.
    Downgrade,

    /// `a + a = 2a`
    /// `2a + 3a = 5a`
    /// etc.
    CombineLikeTerms,

    /// `a * a = a^2`
    /// `a^2 * a^3 = a^5`
    /// etc.
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `2^3 = 8`
    FoldPower,

    /// `(a^2)^3 = a^6`
    PowerPower,
}

//! Functionality for displaying fractions to humans. Plain ASCII (`-3/8`) is what `Display` uses
//! and what round-trips through logs and test expectations, but typeset output reads better with a
//! real minus sign and fraction slash (`−3⁄8`). Types describe themselves once as a list of markup
//! [`Block`]s, and each [`RenderMode`] decides how to turn those blocks into text.

/// A primitive in the markup system. Any type that can represent itself using these pieces can be
/// rendered in every mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Plain text, already formatted for humans.
    Text(String),
    /// A symbol with different representations depending on the available characters.
    Symbol(Symbol),
    /// Blocks that are rendered one after another with nothing in between.
    Concatenation(Vec<Block>),
    /// A numerator over a denominator.
    Fraction(Box<Block>, Box<Block>),
}

/// A symbol that can be represented using Unicode or ASCII, such as the minus sign −.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Symbol {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl Block {
    pub fn new_text<T: Into<String>>(string: T) -> Self {
        Block::Text(string.into())
    }

    pub const fn new_symbol(ascii: &'static str, unicode: &'static str) -> Self {
        Block::Symbol(Symbol { ascii, unicode })
    }

    pub fn new_concatenation<T: IntoIterator<Item = Block>>(t: T) -> Self {
        Block::Concatenation(t.into_iter().collect())
    }

    /// A signed integer. Negative values get a [`Block::MINUS_SIGN`] in front of their magnitude,
    /// so that modes can pick the right glyph.
    pub fn new_int(value: i64) -> Self {
        let magnitude = Block::new_uint(value.unsigned_abs());
        if value < 0 {
            Block::new_concatenation([Block::MINUS_SIGN, magnitude])
        } else {
            magnitude
        }
    }

    pub fn new_uint(value: u64) -> Self {
        Block::Text(value.to_string())
    }

    pub fn new_fraction(numerator: Block, denominator: Block) -> Self {
        Block::Fraction(numerator.into(), denominator.into())
    }

    /// The fraction slash, represented using a normal slash in ASCII mode.
    pub const FRAC_SLASH: Block = Block::new_symbol("/", "\u{2044}");

    /// The minus sign, falling back to a hyphen.
    pub const MINUS_SIGN: Block = Block::new_symbol("-", "\u{2212}");
}

/// A render *mode*: an environment in which information can be displayed.
pub trait RenderMode {
    /// Renders plain text. Modes that need escaping do it here.
    fn render_text(&self, text: &str) -> String {
        text.to_string()
    }

    /// Renders a symbol.
    fn render_symbol(&self, sym: &Symbol) -> String {
        sym.unicode.to_string()
    }

    /// Renders a concatenation of other blocks, one after another.
    fn render_concatenation(&self, blocks: &[Block]) -> String {
        blocks.iter().map(|b| self.render_block(b)).collect()
    }

    /// Renders a fraction as numerator, slash, denominator.
    fn render_fraction(&self, numerator: &Block, denominator: &Block) -> String {
        [
            self.render_block(numerator),
            self.render_block(&Block::FRAC_SLASH),
            self.render_block(denominator),
        ]
        .concat()
    }

    /// Render a block.
    ///
    /// When implementing [`RenderMode`], generally do not override this method. Instead, implement
    /// whichever branch methods you want to customize.
    fn render_block(&self, block: &Block) -> String {
        match block {
            Block::Text(t) => self.render_text(t),
            Block::Symbol(sym) => self.render_symbol(sym),
            Block::Concatenation(blocks) => self.render_concatenation(blocks),
            Block::Fraction(num, denom) => self.render_fraction(num, denom),
        }
    }

    /// Renders everything `item` decomposes into.
    fn render_to_string<T: RenderBlocks + ?Sized>(&self, item: &T) -> String {
        self.render_concatenation(&item.components())
    }
}

/// Types that can describe themselves as a sequence of markup blocks.
pub trait RenderBlocks {
    fn components(&self) -> Vec<Block>;
}

impl RenderBlocks for Block {
    fn components(&self) -> Vec<Block> {
        vec![self.clone()]
    }
}

impl<T: RenderBlocks> RenderBlocks for [T] {
    /// Comma-separated list of the elements.
    fn components(&self) -> Vec<Block> {
        let mut blocks = vec![];
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                blocks.push(Block::new_text(", "));
            }
            blocks.push(Block::new_concatenation(item.components()));
        }
        blocks
    }
}

/// Plain ASCII output.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Ascii {}

impl RenderMode for Ascii {
    fn render_symbol(&self, sym: &Symbol) -> String {
        sym.ascii.to_string()
    }
}

/// Unicode output, using typographic symbols where they exist.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Unicode {}

impl RenderMode for Unicode {}

pub const ASCII: Ascii = Ascii {};
pub const UNICODE: Unicode = Unicode {};

/// The mode used by `Display` implementations.
pub const DISPLAY: Ascii = ASCII;

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_int() {
        assert_eq!(ASCII.render_block(&Block::new_int(-12)), "-12");
        assert_eq!(UNICODE.render_block(&Block::new_int(-12)), "\u{2212}12");
        assert_eq!(UNICODE.render_block(&Block::new_int(0)), "0");
        assert_eq!(
            ASCII.render_block(&Block::new_int(i64::MIN)),
            "-9223372036854775808"
        );
    }

    #[test]
    fn test_fraction() {
        let frac = Block::new_fraction(Block::new_int(-5), Block::new_uint(24));
        assert_eq!(ASCII.render_block(&frac), "-5/24");
        assert_eq!(UNICODE.render_block(&frac), "\u{2212}5\u{2044}24");
    }

    #[test]
    fn test_list() {
        let blocks = [Block::new_int(1), Block::new_text("x")];
        assert_eq!(ASCII.render_to_string(&blocks[..]), "1, x");
    }
}

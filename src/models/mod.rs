pub mod marketplace;
pub mod product;
pub mod session;

pub use marketplace::*;
pub use product::*;
pub use session::*;

// Console glyphs
pub const BREADCRUMB_SEPARATOR: &str = " › ";
pub const GLYPH_PRICE: &str = "💰";
pub const GLYPH_RATING: &str = "⭐";
pub const GLYPH_IMAGE: &str = "🖼️";
pub const GLYPH_LINK: &str = "🔗";
pub const GLYPH_CATEGORY: &str = "📂";
pub const GLYPH_CHECK: &str = "✅";
pub const GLYPH_CROSS: &str = "❌";

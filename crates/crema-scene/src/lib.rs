//! The crema landing page: bean floor, page timelines and terminal rendering.

pub mod beans;
pub mod canvas;
pub mod color;
pub mod glyphs;
pub mod layout;
pub mod magnetic;
pub mod page;
pub mod render;

pub use beans::{BeanParticle, bean_count, generate_field, roll_target};
pub use layout::{PageLayout, Section};
pub use magnetic::{MagneticCard, magnetic_targets};
pub use page::{Page, PageContext, PageView};
pub use render::render;

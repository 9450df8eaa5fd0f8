pub mod component;
pub mod context;
pub mod design;
pub mod member;
pub mod population;

pub use component::Component;
pub use context::GenerationContext;
pub use design::{ComponentDesign, MemberDesign};
pub use member::Member;
pub use population::Population;

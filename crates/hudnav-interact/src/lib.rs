//! Hover and selection for interactive scene objects.

mod hover;
mod pointer;

pub use hover::{
    HoverArbiter, HoverState, HoverTuning, InteractionEvent, InteractiveObject, ObjectKind,
};
pub use pointer::{ActivePointer, Modality, PointerSources, Viewport, resolve_pointer};

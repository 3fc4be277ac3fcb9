mod pointer;
mod resize;

pub use pointer::wire_pointer_move;
pub use resize::wire_resize;

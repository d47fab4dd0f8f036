// Domain layer: models, ports (interfaces) and the pure calculations the
// view layer derives its rendering from.

pub mod model;
pub mod ports;
pub mod slots;
pub mod venues;

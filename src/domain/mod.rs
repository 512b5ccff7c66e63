// Domain layer: data model and the collaborator ports the engine calls through.

pub mod model;
pub mod ports;

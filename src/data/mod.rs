pub mod catalog;
pub mod probe;
pub mod resource;
pub mod site;
pub mod yields;

pub use catalog::Catalog;
pub use catalog::SiteDef;
pub use probe::Kind;
pub use probe::Probe;
pub use resource::Resource;
pub use site::Site;
pub use yields::ResourceYield;

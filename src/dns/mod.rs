pub mod lookup;

pub use lookup::{
    LookupError,
    NameserverResolver,
    Resolver,
};

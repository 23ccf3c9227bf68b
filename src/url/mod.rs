//! URL handling module for Contact-Harvest
//!
//! This module provides seed normalization, link resolution, and the
//! registered-domain (eTLD+1) same-site test that keeps a crawl on one site.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{DomainMatcher, RegisteredDomain};
pub use normalize::{
    downgrade_to_http, is_http_scheme, is_mailto, normalize_link, normalize_seed, strip_fragment,
    SeedTarget,
};

//! Client-side core: session, collection, visibility, statistics and the
//! view-state controllers built on top of them.

pub mod controllers;
pub mod home;
pub mod navigation;
pub mod pagination;
pub mod profile;
pub mod session;
pub mod stats;
pub mod storage;
pub mod visibility;

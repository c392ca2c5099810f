pub mod announcer;
pub mod geocoding;
pub mod google_maps;

/// Analysis modules: partitioning a folder's data files into acquisition
/// subtypes.

pub mod subtypes;

pub use subtypes::cluster_folder;

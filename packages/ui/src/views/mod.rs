mod feed;
pub use feed::FeedView;

mod profile;
pub use profile::ProfileView;

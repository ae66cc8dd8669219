mod landing;
pub use landing::Landing;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod feed;
pub use feed::Feed;

mod profile;
pub use profile::Profile;

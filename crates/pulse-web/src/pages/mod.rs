//! Page Components

mod dashboard;
mod landing;
mod login;
mod not_found;
mod onboarding;

pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use onboarding::OnboardingPage;

mod layouts;
pub use layouts::{AdminLayout, AuthLayout, DashboardLayout, PrivateLayout, RootLayout};

mod home;
pub use home::Home;

mod lessons;
pub use lessons::PublicLessons;

mod lesson_details;
pub use lesson_details::LessonDetails;

mod pricing;
pub use pricing::{PaymentCancel, PaymentSuccess, Pricing};

mod login;
pub use login::{AuthCallback, Login};

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::{Profile, UserHome};

mod lesson_form;
pub use lesson_form::{AddLesson, UpdateLesson};

mod my_lessons;
pub use my_lessons::MyLessons;

mod favorites;
pub use favorites::MyFavorites;

mod admin;
pub use admin::{AdminHome, ManageLessons, ManageUsers, ReportedLessons};

mod not_found;
pub use not_found::NotFound;

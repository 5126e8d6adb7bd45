//! UI Components
//!
//! Pages and the pieces they share.

mod navbar;
mod flash_banner;
mod field_error;
mod campaign_card;
mod campaigns_page;
mod home_page;
mod cart_page;
mod login_page;
mod register_page;
mod campaign_form;
mod payment_success;

pub use navbar::Navbar;
pub use flash_banner::FlashBanner;
pub use field_error::FieldError;
pub use campaign_card::CampaignCard;
pub use campaigns_page::CampaignsPage;
pub use home_page::HomePage;
pub use cart_page::CartPage;
pub use login_page::LoginPage;
pub use register_page::RegisterPage;
pub use campaign_form::CampaignForm;
pub use payment_success::PaymentSuccess;

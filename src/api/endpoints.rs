//! Endpoint table for the Organic Store backend.
//!
//! Every path is relative to the API root (`base_url + api_prefix`).
//! Templates use `{name}` placeholders filled in by [`build_path`].
//!
//! # Example
//!
//! ```rust
//! use organic_store::api::endpoints::{self, build_path};
//!
//! let path = build_path(
//!     endpoints::product::PRIMARY_IMAGE,
//!     &[("product_id", "p1"), ("image_id", "img 2")],
//! );
//! assert_eq!(path, "/product/p1/images/img%202/primary");
//! ```

/// Authentication and profile endpoints.
pub mod auth {
    pub const REGISTER: &str = "/auth/register";
    pub const SEND_OTP: &str = "/auth/otp";
    pub const LOGIN: &str = "/auth/login";
    pub const REFRESH_TOKEN: &str = "/auth/refresh-token";
    pub const LOGOUT: &str = "/auth/logout";
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
    pub const RESET_PASSWORD: &str = "/auth/reset-password";
    pub const PROFILE: &str = "/auth/profile";
    pub const AVATAR: &str = "/auth/avatar";
}

/// Product catalogue endpoints.
pub mod product {
    pub const ALL: &str = "/product";
    pub const CREATE: &str = "/product/create";
    pub const PAGINATION: &str = "/product/pagination";
    pub const BY_ID: &str = "/product/{id}";
    pub const IMAGES: &str = "/product/{id}/images";
    pub const IMAGE: &str = "/product/{product_id}/images/{image_id}";
    pub const PRIMARY_IMAGE: &str = "/product/{product_id}/images/{image_id}/primary";
}

/// Server-side cart endpoints.
pub mod cart {
    pub const ROOT: &str = "/cart";
    pub const PAGINATION: &str = "/cart/pagination";
    pub const ITEM: &str = "/cart/{id}";
}

/// Category endpoints.
pub mod category {
    pub const ALL: &str = "/category";
    pub const CREATE: &str = "/category/create";
    pub const PAGINATION: &str = "/category/pagination";
    pub const BY_ID: &str = "/category/{id}";
}

/// Order endpoints.
pub mod order {
    pub const CHECKOUT_FROM_CART: &str = "/order/checkout-from-cart";
    pub const PAGINATION: &str = "/order/pagination";
    pub const BY_ID: &str = "/order/{id}";
}

/// Wishlist endpoints.
pub mod wishlist {
    pub const LIST: &str = "/wishlist";
    pub const TOGGLE: &str = "/wishlist/{product_id}/toggle";
}

/// Payment endpoints.
pub mod payment {
    pub const MOMO_CREATE: &str = "/payments/momo/create";
    pub const MOMO_IPN: &str = "/payments/momo/ipn";
}

/// Fills the `{name}` placeholders of `template`.
///
/// Values are percent-encoded so an id can never change the path shape.
#[must_use]
pub fn build_path(template: &str, ids: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    result
}

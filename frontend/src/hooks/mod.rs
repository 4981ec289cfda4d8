pub mod use_booking;
pub mod use_my_slots;
pub mod use_public_slots;
pub mod use_settings;

use shared::ApiError;

/// One fetch lifecycle, shared by every data-loading hook instead of the
/// per-view loading/error boolean pairs the views would otherwise grow.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    Failed(ApiError),
}

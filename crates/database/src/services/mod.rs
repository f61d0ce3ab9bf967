/// Copies every `Some` field of a partial update onto an active model.
/// Fields listed after `optional:` are nullable columns.
macro_rules! apply_patch {
    ($am:ident, $patch:ident; $($field:ident),* ; optional: $($opt:ident),* $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $am.$field = sea_orm::ActiveValue::Set(value);
            }
        )*
        $(
            if let Some(value) = $patch.$opt {
                $am.$opt = sea_orm::ActiveValue::Set(Some(value));
            }
        )*
    };
}

pub mod annotation;
pub mod coach;
pub(crate) mod consistency;
pub mod location;
pub mod reservation;
pub mod session;
pub mod user;
pub mod video;

pub use annotation::AnnotationService;
pub use coach::CoachService;
pub use location::LocationService;
pub use reservation::ReservationService;
pub use session::SessionService;
pub use user::UserService;
pub use video::VideoService;

mod record;
mod store;
mod view;

pub use record::{FavoriteRecord, favorite_id};
pub use store::{FAVORITES_KEY, FavoritesStore};
pub use view::{FavoriteSort, ShowGroup, group_by_show, sort_within};

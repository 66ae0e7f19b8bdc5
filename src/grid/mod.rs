//! Grid rendering
//!
//! [`with_grid`] lifts a component that renders one content item into a
//! component that renders a whole list as a grid, with an optional fallback
//! when the list is absent.

pub mod item;
mod view;

use indexmap::IndexMap;
use std::marker::PhantomData;

pub use item::{
    grid_item, page_grid, page_grid_item, post_grid, post_grid_item, GridItem, PageGrid, PostGrid,
};
pub use view::{Element, View};

/// Class of the grid container
pub const CONTAINER_CLASS: &str = "grid-container";

/// Properties forwarded unchanged to every rendered item
pub type Props = IndexMap<String, serde_json::Value>;

/// What an item component receives for one element
#[derive(Debug)]
pub struct ItemProps<'a, T> {
    /// Position of the element in the list
    pub key: usize,
    pub content: &'a T,
    pub props: &'a Props,
}

/// A list-rendering component built by [`with_grid`]
pub struct Grid<T, C> {
    component: C,
    _item: PhantomData<fn(&T)>,
}

/// Wrap an item component so it renders lists as a grid
pub fn with_grid<T, C>(component: C) -> Grid<T, C>
where
    C: Fn(ItemProps<'_, T>) -> View,
{
    Grid {
        component,
        _item: PhantomData,
    }
}

impl<T, C> Grid<T, C>
where
    C: Fn(ItemProps<'_, T>) -> View,
{
    /// Render `data` as a grid.
    ///
    /// A present list, even an empty one, yields one child per element in
    /// input order, keyed by index. An absent list yields the fallback view,
    /// or an empty container when there is none.
    pub fn render(
        &self,
        data: Option<&[T]>,
        fallback: Option<&dyn Fn() -> View>,
        props: &Props,
    ) -> View {
        let container = Element::new("div").class(CONTAINER_CLASS);

        let container = match data {
            Some(items) => container.children(items.iter().enumerate().map(|(i, content)| {
                (self.component)(ItemProps {
                    key: i,
                    content,
                    props,
                })
                .with_key(i)
            })),
            None => match fallback {
                Some(fallback) => container.child(fallback()),
                None => container,
            },
        };

        container.into()
    }
}

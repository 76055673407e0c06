//! Code-generation macros used across the crate.

/// Generate `cursor_at_<query>` and `cursor_mut_at_<query>` constructors for
/// each key query that answers a [`Handle`](crate::Handle).
macro_rules! cursor_queries {
    ($($query:ident),* $(,)?) => {
        paste::paste! {
            impl<T, C: $crate::compare::TreeCompare<T>> $crate::types::RbTree<T, C> {
                $(
                    #[doc = concat!("Cursor at [`", stringify!($query), "`](Self::", stringify!($query), ").")]
                    pub fn [<cursor_at_ $query>](
                        &self,
                        key: &C::Key,
                    ) -> $crate::iteration::Cursor<'_, T, C> {
                        self.cursor(self.$query(key))
                    }

                    #[doc = concat!("Mutable cursor at [`", stringify!($query), "`](Self::", stringify!($query), ").")]
                    pub fn [<cursor_mut_at_ $query>](
                        &mut self,
                        key: &C::Key,
                    ) -> $crate::iteration::CursorMut<'_, T, C> {
                        let handle = self.$query(key);
                        self.cursor_mut(handle)
                    }
                )*
            }
        }
    };
}

//! Reducer for resource stores.

use std::marker::PhantomData;

use crate::models::Entity;
use crate::mvi::Reducer;

use super::intent::ResourceIntent;
use super::state::ResourceState;

/// Reducer for every resource collection.
///
/// Pure function. Network calls and logging happen in the store around the
/// dispatch call.
pub struct ResourceReducer<E>(PhantomData<fn() -> E>);

fn replace_by_id<E: Entity>(list: &mut [E], entity: &E) {
    for slot in list.iter_mut().filter(|slot| slot.id() == entity.id()) {
        *slot = entity.clone();
    }
}

fn succeed<E>(state: &mut ResourceState<E>, message: Option<String>) {
    state.is_loading = false;
    state.is_success = true;
    state.is_error = false;
    if message.is_some() {
        state.message = message;
    }
}

impl<E: Entity> Reducer for ResourceReducer<E> {
    type State = ResourceState<E>;
    type Intent = ResourceIntent<E>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ResourceIntent::Started => {
                state.is_loading = true;
                state.is_success = false;
                state.is_error = false;
            }

            ResourceIntent::Listed { items } => {
                state.items = items;
                succeed(&mut state, None);
            }

            ResourceIntent::ScopedListed { items } => {
                state.scoped = items;
                succeed(&mut state, None);
            }

            ResourceIntent::Selected { entity } => {
                state.selected = Some(entity);
                succeed(&mut state, None);
            }

            ResourceIntent::Created { entity, message } => {
                state.items.push(entity);
                succeed(&mut state, message);
            }

            ResourceIntent::Updated { entity, message } => {
                if let Some(entity) = entity {
                    replace_by_id(&mut state.items, &entity);
                    replace_by_id(&mut state.scoped, &entity);
                    if state
                        .selected
                        .as_ref()
                        .is_some_and(|selected| selected.id() == entity.id())
                    {
                        state.selected = Some(entity);
                    }
                }
                succeed(&mut state, message);
            }

            ResourceIntent::Removed { id, message } => {
                state.items.retain(|entity| entity.id() != id);
                state.scoped.retain(|entity| entity.id() != id);
                if state
                    .selected
                    .as_ref()
                    .is_some_and(|selected| selected.id() == id)
                {
                    state.selected = None;
                }
                succeed(&mut state, message);
            }

            ResourceIntent::Failed { message } => {
                state.is_loading = false;
                state.is_success = false;
                state.is_error = true;
                state.message = Some(message);
            }
        }
        state
    }
}

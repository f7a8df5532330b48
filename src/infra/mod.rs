pub mod controller;
pub mod database;
pub mod service;
pub mod view;

pub mod router {
    use std::sync::Arc;

    use salvo::{logging::Logger, Router};

    use super::{controller::*, view::ViewRenderer};
    use crate::domain::service::UserService;

    /// User endpoints.
    ///
    /// The create submission is bound to `POST /users/create`; the display of
    /// the empty form keeps `GET` on the same path. `POST /users/delete/<id>`
    /// mirrors the `DELETE` route for HTML forms.
    pub fn app(service: Arc<dyn UserService>, views: Arc<dyn ViewRenderer>) -> Router {
        let ctx = UserContext::new(service, views);

        Router::new()
            .push(
                Router::with_path("users")
                    .get(ListUsersController::new(ctx.clone()))
                    .push(
                        Router::with_path("create")
                            .get(NewUserFormController::new(ctx.clone()))
                            .post(CreateUserController::new(ctx.clone())),
                    )
                    .push(Router::with_path("update").post(UpdateUserController::new(ctx.clone())))
                    .push(
                        Router::with_path("update/<id>")
                            .get(EditUserFormController::new(ctx.clone())),
                    )
                    .push(
                        Router::with_path("delete/<id>")
                            .delete(DeleteUserController::new(ctx.clone()))
                            .post(DeleteUserController::new(ctx)),
                    ),
            )
            .hoop(Logger)
    }
}

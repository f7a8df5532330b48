use std::sync::Arc;

use async_trait::async_trait;
use salvo::{
    http::{
        header::{HeaderValue, LOCATION},
        StatusCode,
    },
    writer::Text,
    Depot, FlowCtrl, Handler, Request, Response,
};

use super::view::ViewRenderer;
use crate::{
    app::{
        resource::user::{Navigation, UserForm},
        use_case,
    },
    domain::{entity::UserId, service::UserService},
    error::{app::ApplicationError, http::BadRequest},
};

macro_rules! map_res_err {
    ($result:ident, $response:ident) => {
        match $result {
            Err(err) => {
                render_error(err, $response);
                return;
            }
            Ok(ok) => ok,
        }
    };
}

fn render_error(err: ApplicationError, res: &mut Response) {
    match &err {
        ApplicationError::BadRequest(_) | ApplicationError::NotFound(_) => {
            tracing::warn!("request rejected: {err}")
        }
        ApplicationError::Persistence(_) | ApplicationError::Render(_) => {
            tracing::error!("request failed: {err}")
        }
    }
    res.render(err);
}

/// Extract a user id from a request id param
fn extract_id(req: &Request) -> Result<UserId, ApplicationError> {
    req.params()
        .get("id")
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| BadRequest::InvalidPathParam("id").into())
}

/// Collaborators shared by every user endpoint.
#[derive(Clone)]
pub struct UserContext {
    service: Arc<dyn UserService>,
    views: Arc<dyn ViewRenderer>,
}

impl UserContext {
    pub fn new(service: Arc<dyn UserService>, views: Arc<dyn ViewRenderer>) -> Self {
        Self { service, views }
    }

    fn respond(&self, result: Result<Navigation, ApplicationError>, res: &mut Response) {
        let navigation = map_res_err!(result, res);

        match navigation {
            Navigation::Render(view) => {
                let result = self.views.render(&view).map_err(ApplicationError::from);
                let body = map_res_err!(result, res);
                res.render(Text::Html(body));
            }
            Navigation::Redirect(location) => {
                res.set_status_code(StatusCode::FOUND);
                res.headers_mut()
                    .insert(LOCATION, HeaderValue::from_static(location));
            }
        }
    }
}

macro_rules! user_controller {
    ($name:ident) => {
        pub struct $name {
            ctx: UserContext,
        }

        impl $name {
            pub fn new(ctx: UserContext) -> Self {
                Self { ctx }
            }
        }
    };
}

user_controller!(ListUsersController);
user_controller!(NewUserFormController);
user_controller!(CreateUserController);
user_controller!(EditUserFormController);
user_controller!(UpdateUserController);
user_controller!(DeleteUserController);

#[async_trait]
impl Handler for ListUsersController {
    async fn handle(&self, _: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = use_case::user::list_users(self.ctx.service.as_ref()).await;
        self.ctx.respond(result, res);
    }
}

#[async_trait]
impl Handler for NewUserFormController {
    async fn handle(&self, _: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        self.ctx.respond(Ok(use_case::user::new_user_form()), res);
    }
}

#[async_trait]
impl Handler for CreateUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<UserForm, ApplicationError> =
            req.parse_body().await.map_err(|err| BadRequest::from(err).into());
        let form = map_res_err!(result, res);

        let result = use_case::user::create_user(self.ctx.service.as_ref(), form).await;
        self.ctx.respond(result, res);
    }
}

#[async_trait]
impl Handler for EditUserFormController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_id(req);
        let id = map_res_err!(result, res);

        let result = use_case::user::edit_user_form(self.ctx.service.as_ref(), id).await;
        self.ctx.respond(result, res);
    }
}

#[async_trait]
impl Handler for UpdateUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<UserForm, ApplicationError> =
            req.parse_body().await.map_err(|err| BadRequest::from(err).into());
        let form = map_res_err!(result, res);

        let result = use_case::user::update_user(self.ctx.service.as_ref(), form).await;
        self.ctx.respond(result, res);
    }
}

#[async_trait]
impl Handler for DeleteUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_id(req);
        let id = map_res_err!(result, res);

        let result = use_case::user::delete_user(self.ctx.service.as_ref(), id).await;
        self.ctx.respond(result, res);
    }
}

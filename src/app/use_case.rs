pub mod user {
    use crate::{
        app::{
            resource::user::{
                FormAction, Navigation, UserForm, UserFormView, UserListView, View,
                USER_LIST_LOCATION,
            },
            transform::user::bind_user,
        },
        domain::{
            entity::{User, UserId},
            service::UserService,
            validation::{rules, validate, Validated},
        },
        error::{app::ApplicationError, resource::NotFoundError},
    };

    /// Binds and validates a submitted form.
    ///
    /// On any violation the caller gets back the form view to render, carrying
    /// the attempted input and every collected violation.
    fn validation_gate(form: UserForm, action: FormAction) -> Result<Validated<User>, Navigation> {
        validate(bind_user(form.clone(), action), rules::user()).map_err(|err| {
            tracing::warn!(action = action.as_str(), "rejected user form: {err}");
            Navigation::Render(View::UserForm(UserFormView::rejected(
                err.resource,
                form,
                action,
                err.fields,
            )))
        })
    }

    pub async fn list_users<S>(service: &S) -> Result<Navigation, ApplicationError>
    where
        S: UserService + ?Sized,
    {
        let user_list = service.find_all().await?;
        Ok(Navigation::Render(View::UserList(UserListView { user_list })))
    }

    pub fn new_user_form() -> Navigation {
        Navigation::Render(View::UserForm(UserFormView::new(
            User::default(),
            FormAction::Create,
        )))
    }

    pub async fn create_user<S>(service: &S, form: UserForm) -> Result<Navigation, ApplicationError>
    where
        S: UserService + ?Sized,
    {
        let user = match validation_gate(form, FormAction::Create) {
            Ok(user) => user,
            Err(form_view) => return Ok(form_view),
        };

        let user = service.insert_by_user(user).await?;
        tracing::info!(id = ?user.id, "user created");

        Ok(Navigation::Redirect(USER_LIST_LOCATION))
    }

    pub async fn edit_user_form<S>(service: &S, id: UserId) -> Result<Navigation, ApplicationError>
    where
        S: UserService + ?Sized,
    {
        let user = service
            .find_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::from_resource::<User>(id))?;

        Ok(Navigation::Render(View::UserForm(UserFormView::new(
            user,
            FormAction::Update,
        ))))
    }

    pub async fn update_user<S>(service: &S, form: UserForm) -> Result<Navigation, ApplicationError>
    where
        S: UserService + ?Sized,
    {
        let user = match validation_gate(form, FormAction::Update) {
            Ok(user) => user,
            Err(form_view) => return Ok(form_view),
        };

        let user = service.update(user).await?;
        tracing::info!(id = ?user.id, "user updated");

        Ok(Navigation::Redirect(USER_LIST_LOCATION))
    }

    pub async fn delete_user<S>(service: &S, id: UserId) -> Result<Navigation, ApplicationError>
    where
        S: UserService + ?Sized,
    {
        service.delete(id).await?;
        tracing::info!(id, "user deleted");

        Ok(Navigation::Redirect(USER_LIST_LOCATION))
    }

}

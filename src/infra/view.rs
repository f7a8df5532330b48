use minijinja::{AutoEscape, Environment};

use crate::{
    app::resource::user::View,
    error::{view::RenderError, UnknownError},
};

/// Turns a view into the body sent to the client.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> Result<String, RenderError>;
}

const TEMPLATES: [(&str, &str); 2] = [
    ("userList", include_str!("../../templates/userList.html")),
    ("userForm", include_str!("../../templates/userForm.html")),
];

/// HTML renderer backed by the templates embedded in the binary.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|err| RenderError::Template {
                    view: name,
                    source: UnknownError::from(err),
                })?;
        }

        Ok(Self { env })
    }
}

impl ViewRenderer for TemplateRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        let name = view.name();
        let template = self
            .env
            .get_template(name)
            .map_err(|_| RenderError::MissingTemplate(name))?;

        let rendered = match view {
            View::UserList(model) => template.render(model),
            View::UserForm(model) => template.render(model),
        };

        rendered.map_err(|err| RenderError::Template {
            view: name,
            source: err.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        app::resource::user::{FormAction, UserForm, UserFormView, UserListView},
        domain::entity::User,
        error::resource::{ValidationErrorKind, ValidationFieldError},
    };

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new().expect("Expect embedded templates to compile")
    }

    #[test]
    fn list_renders_each_user_with_its_links() {
        let view = View::UserList(UserListView {
            user_list: vec![User::new("ana", 30, "1994-03-01").with_id(7)],
        });

        let html = renderer().render(&view).unwrap();

        assert!(html.contains(">ana</a>"));
        assert!(html.contains(r#"href="/users/update/7""#));
        assert!(html.contains(r#"action="/users/delete/7""#));
        assert!(!html.contains("No users yet"));
    }

    #[test]
    fn empty_list_says_so() {
        let view = View::UserList(UserListView { user_list: vec![] });

        let html = renderer().render(&view).unwrap();

        assert!(html.contains("No users yet"));
    }

    #[test]
    fn create_form_posts_to_create_without_id() {
        let view = View::UserForm(UserFormView::new(User::default(), FormAction::Create));

        let html = renderer().render(&view).unwrap();

        assert!(html.contains(r#"action="/users/create""#));
        assert!(!html.contains(r#"name="id""#));
        assert!(html.contains(r#"name="age" value="""#));
    }

    #[test]
    fn update_form_carries_id_values_and_messages() {
        let mut view = UserFormView::new(
            User::new("<b>ana</b>", 400, "1994-03-01").with_id(7),
            FormAction::Update,
        );
        view.errors.push(ValidationFieldError {
            path: "/age".into(),
            value: "400".into(),
            type_id: "base::i32",
            kind: ValidationErrorKind::Maximum(300),
            message: "age must be between 0 and 300".into(),
        });

        let html = renderer().render(&View::UserForm(view)).unwrap();

        assert!(html.contains(r#"action="/users/update""#));
        assert!(html.contains(r#"name="id" value="7""#));
        assert!(html.contains(r#"name="age" value="400""#));
        assert!(html.contains("&lt;b&gt;ana"));
        assert!(!html.contains("<b>ana"));
        assert_eq!(html.matches("age must be between 0 and 300").count(), 1);
    }

    #[test]
    fn rejected_form_shows_the_submitted_text() {
        let input = UserForm {
            id: None,
            name: Some("ana".into()),
            age: Some("thirty".into()),
            birthday: Some("1994-03-01".into()),
        };
        let view = UserFormView::rejected(
            User {
                name: "ana".into(),
                birthday: "1994-03-01".into(),
                ..User::default()
            },
            input,
            FormAction::Update,
            vec![ValidationFieldError {
                path: "/age".into(),
                value: "thirty".into(),
                type_id: "base::i32",
                kind: ValidationErrorKind::InvalidType,
                message: "age must be a number".into(),
            }],
        );

        let html = renderer().render(&View::UserForm(view)).unwrap();

        assert!(html.contains(r#"name="age" value="thirty""#));
        assert!(html.contains(r#"name="id" value="""#));
        assert!(!html.contains("None"));
    }
}

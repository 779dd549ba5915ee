//! Tree renderer: walks a forest depth-first and composes nested markup.

use tracing::{debug, instrument, trace};

use crate::application::options::MenuOptions;
use crate::domain::{
    Forest, HierarchyBuilder, LevelConfig, MenuError, MenuResult, NodeRef, Record,
};
use crate::infrastructure::{
    HtmlTagBuilder, PlaceholderTemplates, TagBuilder, TemplateContext, TemplateRenderer,
};

/// Parameter name reserved for the record itself.
const DATA_PARAM: &str = "data";

/// Renders a [`Forest`] using per-depth options.
pub struct TreeRenderer<'a, R, T, B> {
    options: &'a MenuOptions<R>,
    templates: &'a T,
    tags: &'a B,
}

impl<'a, R, T, B> TreeRenderer<'a, R, T, B>
where
    R: Record,
    T: TemplateRenderer<R>,
    B: TagBuilder,
{
    pub fn new(options: &'a MenuOptions<R>, templates: &'a T, tags: &'a B) -> Self {
        Self {
            options,
            templates,
            tags,
        }
    }

    /// Render the whole forest.
    ///
    /// Options are validated first. Any configuration error aborts the
    /// render; partial markup is never returned. An empty forest renders to
    /// an empty string.
    #[instrument(level = "debug", skip_all, fields(roots = forest.roots().count()))]
    pub fn render(&self, forest: &Forest<R>) -> MenuResult<String> {
        self.options.validate()?;
        let template = self
            .options
            .item_template
            .as_ref()
            .ok_or_else(|| MenuError::config("item template is not defined"))?;

        let roots: Vec<_> = forest.roots().collect();
        let output = self.render_items(&roots, 0, None, template)?;
        debug!(bytes = output.len(), "rendered menu");
        Ok(output)
    }

    /// Render one list of siblings at `depth`.
    ///
    /// `parent` is the item owning this list (`None` for the roots); the main
    /// container options are resolved against it.
    fn render_items(
        &self,
        items: &[NodeRef<'_, R>],
        depth: usize,
        parent: Option<NodeRef<'_, R>>,
        template: &LevelConfig<String, R>,
    ) -> MenuResult<String> {
        if items.is_empty() {
            return Ok(String::new());
        }

        let options = self.options;
        let mut output = String::new();

        for &item in items {
            trace!(id = %item.id(), depth, "rendering item");

            let template_ref = resolve("item_template", template, depth, Some(item))?;
            let mut params = resolve(
                "item_template_params",
                &options.item_template_params,
                depth,
                Some(item),
            )?;
            if params.remove(DATA_PARAM).is_some() {
                trace!("template parameter 'data' shadowed by the record");
            }

            let ctx = TemplateContext {
                data: item.record(),
                params: &params,
                depth,
            };
            let mut content = self.templates.render(&template_ref, &ctx)?;

            let children: Vec<_> = item.children().collect();
            content.push_str(&self.render_items(&children, depth + 1, Some(item), template)?);

            let tag = resolve(
                "item_container_tag",
                &options.item_container_tag,
                depth,
                Some(item),
            )?;
            let attributes = resolve(
                "item_container_options",
                &options.item_container_options,
                depth,
                Some(item),
            )?;
            output.push_str(&self.tags.tag(&tag, &content, &attributes));
        }

        let tag = resolve(
            "main_container_tag",
            &options.main_container_tag,
            depth,
            parent,
        )?;
        let mut attributes = resolve(
            "main_container_options",
            &options.main_container_options,
            depth,
            parent,
        )?;
        if depth == 0 {
            if let Some(menu_id) = &options.menu_id {
                attributes.insert("id".to_string(), menu_id.clone());
            }
        }

        Ok(self.tags.tag(&tag, &output, &attributes))
    }
}

/// Resolve `config`, naming the option in configuration errors.
fn resolve<V: Clone, R>(
    name: &str,
    config: &LevelConfig<V, R>,
    depth: usize,
    node: Option<NodeRef<'_, R>>,
) -> MenuResult<V> {
    config.resolve(depth, node).map_err(|e| match e {
        MenuError::Configuration(message) => {
            MenuError::Configuration(format!("{}: {}", name, message))
        }
        other => other,
    })
}

/// Render a forest with the bundled placeholder templates and HTML tags.
pub fn render_forest<R: Record>(forest: &Forest<R>, options: &MenuOptions<R>) -> MenuResult<String> {
    let templates = PlaceholderTemplates::new();
    TreeRenderer::new(options, &templates, &HtmlTagBuilder).render(forest)
}

/// Build a forest from `records` and render it in one go.
pub fn render_records<R, I, T, B>(
    records: I,
    options: &MenuOptions<R>,
    templates: &T,
    tags: &B,
) -> MenuResult<String>
where
    R: Record,
    I: IntoIterator<Item = R>,
    T: TemplateRenderer<R>,
    B: TagBuilder,
{
    // Fail on configuration before touching the records.
    options.validate()?;
    let forest = HierarchyBuilder::new(options.fields.clone())
        .with_orphans(options.orphans)
        .build(records)?;
    TreeRenderer::new(options, templates, tags).render(&forest)
}

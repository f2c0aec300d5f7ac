mod todo_steps;
